//! Session planner: focus selection and progressive-overload prescriptions.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::family::Family;
use crate::milestones::FamilyScore;
use crate::record::{SetRecord, TrainingLog};

/// Smallest load increment (kg).
pub const PLATE_STEP: f64 = 2.5;

/// Warm-up ramps and working loads at or below this are not worth ramping (kg).
pub const RAMP_FLOOR: f64 = 20.0;

/// One display row of the recommended session.
///
/// Prescription and load are kept as rendered text; the report parses them
/// back when it totals tonnage.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationLine {
    pub movement: String,
    pub sets_reps: String,
    pub load: String,
    pub rationale: String,
}

impl RecommendationLine {
    pub fn new(
        movement: impl Into<String>,
        sets_reps: impl Into<String>,
        load: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            movement: movement.into(),
            sets_reps: sets_reps.into(),
            load: load.into(),
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub primary: Family,
    pub secondary: Option<Family>,
}

impl Focus {
    pub fn families(&self) -> Vec<Family> {
        std::iter::once(self.primary).chain(self.secondary).collect()
    }
}

/// Round to the nearest plate step, ties to the even multiple.
pub fn round_to_plate(load: f64) -> f64 {
    (load / PLATE_STEP).round_ties_even() * PLATE_STEP
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Primary is the top-scored family; its antagonist joins as secondary when
/// it scores at least half the median.
///
/// `scores` must already be sorted highest first.
pub fn select_focus(scores: &[FamilyScore]) -> Option<Focus> {
    let primary = scores.first()?.family;
    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    let threshold = median(&values).unwrap_or(0.0) * 0.5;

    let secondary = primary.antagonist().filter(|candidate| {
        scores
            .iter()
            .find(|s| s.family == *candidate)
            .is_some_and(|s| s.score >= threshold)
    });

    Some(Focus { primary, secondary })
}

/// Best e1RM per calendar day, oldest first.
pub fn best_e1rm_per_day<'a>(rows: impl IntoIterator<Item = &'a SetRecord>) -> Vec<(NaiveDate, f64)> {
    let mut days: Vec<(NaiveDate, f64)> = Vec::new();
    for row in rows {
        let date = row.date();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, best)) => *best = best.max(row.e1rm()),
            None => days.push((date, row.e1rm())),
        }
    }
    days.sort_by_key(|(d, _)| *d);
    days
}

/// e1RM progress used to call a stall.
///
/// With more than `lookback` days, the latest day is compared against the best
/// of everything older than the window; otherwise against the first day. A
/// single day counts as progress.
pub fn stall_delta(daily_bests: &[f64], lookback: usize) -> f64 {
    match daily_bests {
        [] | [_] => 1.0,
        [first, .., last] if daily_bests.len() <= lookback => last - first,
        [.., last] => {
            let before_window = &daily_bests[..daily_bests.len() - lookback];
            last - before_window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        }
    }
}

pub fn is_stalling(delta: f64) -> bool {
    delta <= 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Stalled on low reps: drop load, add volume.
    Volume,
    /// Stalled on high reps: add load, drop reps.
    Heavy,
    AddLoad,
    AddRep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prescription {
    pub block: Block,
    pub sets: u32,
    pub reps: u32,
    pub load: f64,
}

impl Prescription {
    pub fn rationale(&self, last_load: f64, last_reps: u32) -> String {
        match self.block {
            Block::Volume => "Stalling on heavy work -> volume block".to_string(),
            Block::Heavy => "Stalling on volume -> heavy block".to_string(),
            Block::AddLoad => format!("+2.5kg from last ({last_load:.1}kg x {last_reps})"),
            Block::AddRep => format!("+1 rep from last ({last_load:.1}kg x {last_reps})"),
        }
    }
}

pub fn prescribe(last_load: f64, last_reps: u32, stalling: bool) -> Prescription {
    match (stalling, last_reps) {
        (true, r) if r <= 5 => Prescription {
            block: Block::Volume,
            sets: 5,
            reps: 5,
            load: round_to_plate(last_load * 0.8),
        },
        (true, _) => Prescription {
            block: Block::Heavy,
            sets: 5,
            reps: 3,
            load: round_to_plate(last_load * 1.1),
        },
        (false, r) if r >= 8 => Prescription {
            block: Block::AddLoad,
            sets: 3,
            reps: r,
            load: last_load + PLATE_STEP,
        },
        (false, r) => Prescription {
            block: Block::AddRep,
            sets: 4,
            reps: r + 1,
            load: last_load,
        },
    }
}

/// Ramp loads at 50% and 70% of the working load, dropping any below the floor.
pub fn warmup_loads(working_load: f64) -> Vec<f64> {
    if working_load <= RAMP_FLOOR {
        return Vec::new();
    }
    [0.5, 0.7]
        .into_iter()
        .map(|pct| round_to_plate(working_load * pct))
        .filter(|load| *load >= RAMP_FLOOR)
        .collect()
}

/// Warm-up and working lines for the family's staple movement.
///
/// Returns nothing when the family has no logged sets.
pub fn plan_family(log: &TrainingLog, family: Family, config: &EngineConfig) -> Vec<RecommendationLine> {
    let Some(movement) = log.most_frequent_movement(family) else {
        return Vec::new();
    };
    let rows: Vec<&SetRecord> = log.movement_rows(&movement).collect();

    let working: Vec<&SetRecord> = rows
        .iter()
        .copied()
        .filter(|r| r.is_working(config.working_rpe))
        .collect();
    let basis = if working.is_empty() { &rows } else { &working };
    let Some(last) = basis.last() else {
        return Vec::new();
    };

    let bests: Vec<f64> = best_e1rm_per_day(rows.iter().copied())
        .into_iter()
        .map(|(_, best)| best)
        .collect();
    let delta = stall_delta(&bests, config.lookback_sessions);
    let stalling = is_stalling(delta);
    let rx = prescribe(last.load, last.reps, stalling);

    debug!(%movement, days = bests.len(), delta, stalling, block = ?rx.block, "prescribed");

    let mut lines: Vec<RecommendationLine> = warmup_loads(rx.load)
        .into_iter()
        .map(|load| {
            RecommendationLine::new(
                format!("{movement} (warm-up)"),
                format!("1 x {}", rx.reps.max(5)),
                format!("{load:.0}"),
                "Ramp-up",
            )
        })
        .collect();

    lines.push(RecommendationLine::new(
        format!("{movement} (working)"),
        format!("{} x {}", rx.sets, rx.reps),
        format!("{:.1}", rx.load),
        rx.rationale(last.load, last.reps),
    ));
    lines
}

/// Focus selection plus the main-lift lines for each focus family.
pub fn plan(log: &TrainingLog, scores: &[FamilyScore], config: &EngineConfig) -> Option<(Focus, Vec<RecommendationLine>)> {
    let focus = select_focus(scores)?;
    info!(primary = %focus.primary, secondary = ?focus.secondary.map(|f| f.label()), "selected focus");

    let lines = focus
        .families()
        .into_iter()
        .flat_map(|family| plan_family(log, family, config))
        .collect();
    Some((focus, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::*;

    fn score(family: Family, score: f64) -> FamilyScore {
        FamilyScore {
            family,
            current_e1rm: 0.0,
            target_e1rm: None,
            gap: 0.0,
            days_since: None,
            score,
        }
    }

    #[test]
    fn test_round_to_plate() {
        assert_eq!(round_to_plate(91.3), 92.5);
        assert_eq!(round_to_plate(66.4), 67.5);
        assert_eq!(round_to_plate(15.4), 15.0);
        assert_eq!(round_to_plate(11.0), 10.0);
        assert_eq!(round_to_plate(42.0), 42.5);
        // 3.75 / 2.5 = 1.5 -> ties to even
        assert_eq!(round_to_plate(3.75), 5.0);
        assert_eq!(round_to_plate(6.25), 5.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_secondary_needs_half_median() {
        let scores = [
            score(Family::Squat, 10.0),
            score(Family::Hinge, 4.0),
            score(Family::PushHorizontal, 2.0),
            score(Family::PushVertical, 1.0),
        ];
        // median 3.0, threshold 1.5
        let focus = select_focus(&scores).unwrap();
        assert_eq!(focus.primary, Family::Squat);
        assert_eq!(focus.secondary, None);

        let scores = [
            score(Family::Squat, 10.0),
            score(Family::Hinge, 4.0),
            score(Family::PushVertical, 2.0),
            score(Family::PushHorizontal, 1.0),
        ];
        let focus = select_focus(&scores).unwrap();
        assert_eq!(focus.secondary, Some(Family::PushVertical));
        assert_eq!(focus.families(), vec![Family::Squat, Family::PushVertical]);
    }

    #[test]
    fn test_secondary_must_be_scored() {
        let scores = [score(Family::PullHorizontal, 3.0), score(Family::Squat, 1.0)];
        let focus = select_focus(&scores).unwrap();
        assert_eq!(focus.primary, Family::PullHorizontal);
        assert_eq!(focus.secondary, None);
        assert!(select_focus(&[]).is_none());
    }

    #[test]
    fn test_stall_delta_windows() {
        assert_eq!(stall_delta(&[], 5), 1.0);
        assert_eq!(stall_delta(&[100.0], 5), 1.0);
        assert_eq!(stall_delta(&[100.0, 104.0, 103.0], 5), 3.0);
        assert_eq!(stall_delta(&[100.0, 101.0, 102.0, 103.0, 104.0], 5), 4.0);
        // six days: only the first day lies before the window
        assert_eq!(stall_delta(&[110.0, 90.0, 95.0, 99.0, 100.0, 111.0], 5), 1.0);
        // seven days: best of first two days
        assert_eq!(stall_delta(&[100.0, 108.0, 90.0, 95.0, 99.0, 100.0, 112.0], 5), 4.0);
    }

    #[test]
    fn test_stall_threshold() {
        assert!(is_stalling(1.0));
        assert!(is_stalling(-3.0));
        assert!(!is_stalling(1.01));
    }

    #[test]
    fn test_best_per_day_takes_max() {
        let rows = [
            set("2026-03-03", "Back Squat", 100.0, 5, 8.0),
            set("2026-03-01", "Back Squat", 90.0, 5, 8.0),
            set("2026-03-03", "Back Squat", 105.0, 3, 9.0),
        ];
        let bests = best_e1rm_per_day(rows.iter());
        assert_eq!(bests.len(), 2);
        assert_eq!(bests[0].0, day("2026-03-01"));
        assert_eq!(bests[1].1, crate::e1rm(105.0, 3).max(crate::e1rm(100.0, 5)));
    }

    #[test]
    fn test_prescription_branches() {
        let a = prescribe(100.0, 5, true);
        assert_eq!((a.block, a.sets, a.reps, a.load), (Block::Volume, 5, 5, 80.0));

        let b = prescribe(83.0, 8, true);
        assert_eq!((b.block, b.sets, b.reps, b.load), (Block::Heavy, 5, 3, 92.5));

        let c = prescribe(60.0, 10, false);
        assert_eq!((c.block, c.sets, c.reps, c.load), (Block::AddLoad, 3, 10, 62.5));

        let d = prescribe(100.0, 5, false);
        assert_eq!((d.block, d.sets, d.reps, d.load), (Block::AddRep, 4, 6, 100.0));
        assert_eq!(d.rationale(100.0, 5), "+1 rep from last (100.0kg x 5)");
    }

    #[test]
    fn test_warmups_filtered_individually() {
        assert!(warmup_loads(20.0).is_empty());
        // 11 -> 10 and 15.4 -> 15, both under the floor
        assert!(warmup_loads(22.0).is_empty());
        assert_eq!(warmup_loads(60.0), vec![30.0, 42.5]);
        // 50% step dropped, 70% kept
        assert_eq!(warmup_loads(30.0), vec![20.0]);
        assert_eq!(warmup_loads(35.0), vec![25.0]);
        assert_eq!(warmup_loads(40.0), vec![20.0, 27.5]);
    }

    #[test]
    fn test_plan_family_skips_empty_family() {
        let log = TrainingLog::new(vec![set("2026-03-01", "Back Squat", 100.0, 5, 8.0)]);
        assert!(plan_family(&log, Family::Hinge, &EngineConfig::default()).is_empty());
    }

    fn loads(lines: &[RecommendationLine]) -> Vec<&str> {
        lines.iter().map(|l| l.load.as_str()).collect()
    }

    #[test]
    fn test_flat_week_on_low_reps_starts_volume_block() {
        let mut rows = Vec::new();
        for d in 1..=7 {
            let date = format!("2026-03-{d:02}");
            // ramp sets below the working threshold don't set last load
            rows.push(set(&date, "Back Squat", 60.0, 5, 5.0));
            rows.push(set(&date, "Back Squat", 100.0, 5, 8.0));
        }
        let log = TrainingLog::new(rows);

        let lines = plan_family(&log, Family::Squat, &EngineConfig::default());
        assert_eq!(loads(&lines), vec!["40", "55", "80.0"]);
        assert_eq!(lines[0].sets_reps, "1 x 5");
        assert_eq!(
            lines[2],
            RecommendationLine::new(
                "Back Squat (working)",
                "5 x 5",
                "80.0",
                "Stalling on heavy work -> volume block"
            )
        );
    }

    #[test]
    fn test_flat_days_on_high_reps_start_heavy_block() {
        let log = TrainingLog::new(vec![
            set("2026-03-01", "Back Squat", 83.0, 8, 8.0),
            set("2026-03-03", "Back Squat", 83.0, 8, 8.0),
            set("2026-03-05", "Back Squat", 83.0, 8, 8.5),
        ]);

        let lines = plan_family(&log, Family::Squat, &EngineConfig::default());
        // ramps 46.25 -> 45 (tie to even) and 64.75 -> 65
        assert_eq!(loads(&lines), vec!["45", "65", "92.5"]);
        assert_eq!(lines[0].sets_reps, "1 x 5");
        assert_eq!(lines[2].sets_reps, "5 x 3");
        assert_eq!(lines[2].rationale, "Stalling on volume -> heavy block");
    }

    #[test]
    fn test_progress_outside_window_is_not_a_stall() {
        // seven days: the 85 kg day sits inside the window, so the latest day
        // only has to beat the two days before it
        let log = TrainingLog::new(vec![
            set("2026-03-01", "Bench Press", 80.0, 5, 8.0),
            set("2026-03-02", "Bench Press", 80.0, 5, 8.0),
            set("2026-03-03", "Bench Press", 85.0, 5, 8.0),
            set("2026-03-04", "Bench Press", 80.0, 5, 8.0),
            set("2026-03-05", "Bench Press", 80.0, 5, 8.0),
            set("2026-03-06", "Bench Press", 80.0, 5, 8.0),
            set("2026-03-07", "Bench Press", 82.5, 5, 8.0),
        ]);

        let lines = plan_family(&log, Family::PushHorizontal, &EngineConfig::default());
        let working = lines.last().unwrap();
        assert_eq!(working.sets_reps, "4 x 6");
        assert_eq!(working.load, "82.5");
        assert_eq!(working.rationale, "+1 rep from last (82.5kg x 5)");
    }

    #[test]
    fn test_plan_family_falls_back_to_unrated_sets() {
        let log = TrainingLog::new(vec![
            SetRecord::new(at("2026-03-01"), "Overhead Press", 40.0, 6),
            SetRecord::new(at("2026-03-03"), "Overhead Press", 42.5, 6),
        ]);
        let lines = plan_family(&log, Family::PushVertical, &EngineConfig::default());
        // e1RM 48 -> 51, progressing, 6 reps -> +1 rep at 42.5
        let working = lines.last().unwrap();
        assert_eq!(working.sets_reps, "4 x 7");
        assert_eq!(working.load, "42.5");
        // ramps 21.25 -> 20 and 29.75 -> 30
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].load, "20");
        assert_eq!(lines[1].load, "30");
        assert_eq!(lines[0].sets_reps, "1 x 7");
    }
}
