//! Milestone targets and per-family training-debt scoring.
//!
//! A family's score is its milestone gap (0 = at target, 1 = nothing lifted)
//! multiplied by days since it was last trained.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::family::Family;
use crate::record::{e1rm, TrainingLog};

/// A load x reps target for a tracked lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub load: f64,
    pub reps: u32,
}

impl Milestone {
    pub fn new(load: f64, reps: u32) -> Self {
        Self { load, reps }
    }

    pub fn target_e1rm(&self) -> f64 {
        e1rm(self.load, self.reps)
    }
}

/// A compound lift whose progress stands in for its family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedLift {
    /// Case-insensitive substring matched against movement names.
    pub term: String,
    pub family: Family,
}

impl TrackedLift {
    pub fn new(term: impl Into<String>, family: Family) -> Self {
        Self {
            term: term.into(),
            family,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyScore {
    pub family: Family,
    pub current_e1rm: f64,
    /// Milestone e1RM the gap was measured against.
    pub target_e1rm: Option<f64>,
    /// 0.0 (at or past the target) to 1.0 (nothing logged).
    pub gap: f64,
    /// `None` when the family has never been logged.
    pub days_since: Option<i64>,
    pub score: f64,
}

/// Pick the milestone whose e1RM is nearest `current`, above or below.
pub fn closest_target(milestones: &[Milestone], current: f64) -> Option<f64> {
    milestones
        .iter()
        .map(Milestone::target_e1rm)
        .fold(None, |best: Option<f64>, t| match best {
            Some(b) if (b - current).abs() <= (t - current).abs() => Some(b),
            _ => Some(t),
        })
}

/// Fraction of `target` still missing; never negative.
pub fn milestone_gap(target: f64, current: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    ((target - current) / target).max(0.0)
}

/// Score every tracked family, highest training debt first.
///
/// Ties keep the tracked-lift order. A family tracked by several terms keeps
/// the score of the last one.
pub fn score_families(log: &TrainingLog, as_of: NaiveDate, config: &EngineConfig) -> Vec<FamilyScore> {
    let mut scores: Vec<FamilyScore> = Vec::new();

    for lift in &config.tracked_lifts {
        let term = lift.term.to_lowercase();
        let current_e1rm = log
            .records()
            .iter()
            .filter(|r| r.movement.to_lowercase().contains(&term))
            .map(|r| r.e1rm())
            .fold(0.0, f64::max);

        let (target_e1rm, gap) = match closest_target(config.milestones_for(&lift.term), current_e1rm) {
            Some(target) => (Some(target), milestone_gap(target, current_e1rm)),
            None => (None, config.unknown_gap),
        };

        let days_since = log
            .last_trained(lift.family)
            .map(|last| (as_of - last).num_days());
        let days = days_since.unwrap_or(config.never_trained_days).max(1);
        let score = gap * days as f64;

        debug!(
            family = %lift.family,
            term = %lift.term,
            current_e1rm,
            ?target_e1rm,
            gap,
            days,
            score,
            "scored family"
        );

        let entry = FamilyScore {
            family: lift.family,
            current_e1rm,
            target_e1rm,
            gap,
            days_since,
            score,
        };
        match scores.iter_mut().find(|s| s.family == lift.family) {
            Some(existing) => *existing = entry,
            None => scores.push(entry),
        }
    }

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::*;

    #[test]
    fn test_closest_target_may_be_below_current() {
        let squat = [Milestone::new(160.0, 1), Milestone::new(100.0, 20)];
        // targets: 165.33 and 166.67; current 170 is closest to 166.67
        let t = closest_target(&squat, 170.0).unwrap();
        assert_eq!(t, e1rm(100.0, 20));
        assert_eq!(milestone_gap(t, 170.0), 0.0);
    }

    #[test]
    fn test_closest_target_from_zero() {
        let bench = [Milestone::new(100.0, 1), Milestone::new(60.0, 10)];
        assert_eq!(closest_target(&bench, 0.0), Some(e1rm(60.0, 10)));
        assert_eq!(closest_target(&[], 0.0), None);
    }

    #[test]
    fn test_gap_edge_cases() {
        assert_eq!(milestone_gap(0.0, 50.0), 0.0);
        assert_eq!(milestone_gap(100.0, 0.0), 1.0);
        assert!((milestone_gap(100.0, 75.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_unlogged_family_uses_fallbacks() {
        let log = TrainingLog::new(vec![set("2026-03-01", "Back Squat", 100.0, 5, 8.0)]);
        let cfg = EngineConfig::default();
        let scores = score_families(&log, day("2026-03-01"), &cfg);

        let hinge = scores.iter().find(|s| s.family == Family::Hinge).unwrap();
        assert_eq!(hinge.current_e1rm, 0.0);
        assert_eq!(hinge.gap, 1.0);
        assert_eq!(hinge.days_since, None);
        assert_eq!(hinge.score, 14.0);

        let squat = scores.iter().find(|s| s.family == Family::Squat).unwrap();
        assert_eq!(squat.days_since, Some(0));
        // floored at one day
        assert_eq!(squat.score, squat.gap);
    }

    #[test]
    fn test_term_without_milestones_gets_default_gap() {
        let mut cfg = EngineConfig::default();
        cfg.tracked_lifts = vec![TrackedLift::new("Pull Up", Family::PullVertical)];
        let log = TrainingLog::new(vec![set("2026-03-01", "Pull Ups", 0.0, 8, 8.0)]);
        let scores = score_families(&log, day("2026-03-05"), &cfg);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].gap, 0.5);
        assert_eq!(scores[0].score, 2.0);
    }

    #[test]
    fn test_scores_sorted_descending() {
        let log = TrainingLog::new(vec![
            set("2026-03-01", "Back Squat", 100.0, 5, 8.0),
            set("2026-03-09", "Bench Press", 105.0, 1, 9.0),
        ]);
        let scores = score_families(&log, day("2026-03-10"), &EngineConfig::default());
        assert_eq!(scores.len(), 4);
        for w in scores.windows(2) {
            assert!(w[0].score >= w[1].score);
        }
        // never-logged families tie at 14.0 and keep tracked order
        assert_eq!(scores[0].family, Family::Hinge);
        assert_eq!(scores[1].family, Family::PushVertical);
    }
}
