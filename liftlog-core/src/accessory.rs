//! Accessory work: under-trained movement patterns plus arm isolation.

use std::collections::HashMap;

use crate::family::Family;
use crate::planner::{Focus, RecommendationLine};
use crate::record::{SetRecord, TrainingLog};

/// Distinct training days that count as "recent" for accessory selection.
pub const RECENT_DAYS: usize = 3;

const ACCESSORY_PICKS: usize = 2;
const ARM_PICKS: usize = 2;

/// Sets per family over the last [`RECENT_DAYS`] logged dates.
pub fn recent_family_counts(log: &TrainingLog) -> HashMap<Family, usize> {
    let dates = log.dates();
    let recent = &dates[dates.len().saturating_sub(RECENT_DAYS)..];

    let mut counts = HashMap::new();
    for row in log.records().iter().filter(|r| recent.contains(&r.date())) {
        *counts.entry(row.family()).or_insert(0) += 1;
    }
    counts
}

/// Movement-pattern families outside the focus, least recent volume first.
pub fn accessory_families(log: &TrainingLog, focus: &Focus) -> Vec<Family> {
    let counts = recent_family_counts(log);
    let used = focus.families();

    let mut families: Vec<Family> = Family::MOVEMENT_PATTERNS
        .into_iter()
        .filter(|f| !used.contains(f))
        .collect();
    families.sort_by_key(|f| counts.get(f).copied().unwrap_or(0));
    families.truncate(ACCESSORY_PICKS);
    families
}

fn last_set<'a>(log: &'a TrainingLog, movement: &str) -> Option<&'a SetRecord> {
    log.movement_rows(movement).last()
}

/// Accessory lines at 3 x 10, then up to two arm movements at their last reps.
///
/// Arm lines are added regardless of the accessory picks, so the same arm
/// movement may appear twice.
pub fn fill_accessories(log: &TrainingLog, focus: &Focus) -> Vec<RecommendationLine> {
    let mut lines = Vec::new();

    for family in accessory_families(log, focus) {
        let Some(movement) = log.most_frequent_movement(family) else {
            continue;
        };
        if let Some(last) = last_set(log, &movement) {
            lines.push(RecommendationLine::new(
                movement,
                "3 x 10",
                format!("{:.0}", last.load),
                format!("{family} accessory"),
            ));
        }
    }

    for (movement, _) in log
        .movements_by_frequency(Family::Arms)
        .into_iter()
        .take(ARM_PICKS)
    {
        if let Some(last) = last_set(log, &movement) {
            lines.push(RecommendationLine::new(
                movement,
                format!("3 x {}", last.reps),
                format!("{:.0}", last.load),
                "Arms accessory",
            ));
        }
    }

    lines
}
