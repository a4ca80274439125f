//! Engine tuning: tracked lifts, milestone targets, planner thresholds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::family::Family;
use crate::milestones::{Milestone, TrackedLift};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Distinct training days that make up the stall window.
    pub lookback_sessions: usize,
    /// Minimum RPE for a set to count as working.
    pub working_rpe: f64,
    /// Staleness assumed for a family that was never logged.
    pub never_trained_days: i64,
    /// Gap used for a tracked lift that has no milestones.
    pub unknown_gap: f64,
    pub tracked_lifts: Vec<TrackedLift>,
    /// Keyed by the tracked lift's search term.
    pub milestones: BTreeMap<String, Vec<Milestone>>,
}

impl EngineConfig {
    pub fn milestones_for(&self, term: &str) -> &[Milestone] {
        self.milestones.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let milestones = [
            ("Squat", vec![Milestone::new(160.0, 1), Milestone::new(100.0, 20)]),
            ("Deadlift", vec![Milestone::new(200.0, 1), Milestone::new(160.0, 5)]),
            ("Overhead Press", vec![Milestone::new(60.0, 3), Milestone::new(40.0, 12)]),
            ("Bench Press", vec![Milestone::new(100.0, 1), Milestone::new(60.0, 10)]),
            ("barbell row", vec![Milestone::new(80.0, 6), Milestone::new(60.0, 12)]),
            ("Kettlebell", vec![Milestone::new(24.0, 80)]),
        ]
        .into_iter()
        .map(|(term, targets)| (term.to_string(), targets))
        .collect();

        Self {
            lookback_sessions: 5,
            working_rpe: 6.0,
            never_trained_days: 14,
            unknown_gap: 0.5,
            tracked_lifts: vec![
                TrackedLift::new("Squat", Family::Squat),
                TrackedLift::new("Deadlift", Family::Hinge),
                TrackedLift::new("Overhead Press", Family::PushVertical),
                TrackedLift::new("Bench Press", Family::PushHorizontal),
            ],
            milestones,
        }
    }
}
