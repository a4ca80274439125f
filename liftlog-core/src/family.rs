//! Movement families and the name classifier.
//!
//! Exact aliases are checked first (case-sensitive), then an ordered keyword
//! list (case-insensitive substring, first match wins).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Biomechanical movement family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "squat")]
    Squat,
    #[serde(rename = "hinge")]
    Hinge,
    #[serde(rename = "push-horizontal")]
    PushHorizontal,
    #[serde(rename = "push-vertical")]
    PushVertical,
    #[serde(rename = "pull-horizontal")]
    PullHorizontal,
    #[serde(rename = "pull-vertical")]
    PullVertical,
    #[serde(rename = "arms")]
    Arms,
    #[serde(rename = "core")]
    Core,
    #[serde(rename = "cardio")]
    Cardio,
    #[serde(rename = "other")]
    Other,
}

impl Family {
    /// The compound movement patterns eligible as accessory picks, in order.
    pub const MOVEMENT_PATTERNS: [Family; 6] = [
        Family::Squat,
        Family::Hinge,
        Family::PushHorizontal,
        Family::PushVertical,
        Family::PullHorizontal,
        Family::PullVertical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Family::Squat => "Squat",
            Family::Hinge => "Hinge",
            Family::PushHorizontal => "Push (H)",
            Family::PushVertical => "Push (V)",
            Family::PullHorizontal => "Pull (H)",
            Family::PullVertical => "Pull (V)",
            Family::Arms => "Arms",
            Family::Core => "Core",
            Family::Cardio => "Cardio",
            Family::Other => "Other",
        }
    }

    /// Opposing pattern used to pair a secondary focus.
    pub fn antagonist(&self) -> Option<Family> {
        match self {
            Family::Squat => Some(Family::PushVertical),
            Family::PushVertical => Some(Family::Squat),
            Family::Hinge => Some(Family::PushHorizontal),
            Family::PushHorizontal => Some(Family::Hinge),
            Family::PullHorizontal => Some(Family::PushHorizontal),
            Family::PullVertical => Some(Family::PushVertical),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const EXACT_NAMES: &[(&str, Family)] = &[
    ("Front Squat", Family::Squat),
    ("Back Squat", Family::Squat),
    ("Zercher Squat", Family::Squat),
    ("Squat", Family::Squat),
    ("Squats", Family::Squat),
    ("Pause Squat", Family::Squat),
    ("Deadlift", Family::Hinge),
    ("Zercher Deadlift", Family::Hinge),
    ("Romanian Deadlift", Family::Hinge),
    ("RDL", Family::Hinge),
    ("Kettlebell Swings", Family::Hinge),
    ("Barbell Bench Press", Family::PushHorizontal),
    ("Bench Press", Family::PushHorizontal),
    ("Incline BB Press", Family::PushHorizontal),
    ("DB Press", Family::PushHorizontal),
    ("Incline DB Press", Family::PushHorizontal),
    ("Incline DB Fly", Family::PushHorizontal),
    ("Incline DB Flys", Family::PushHorizontal),
    ("Incline Dumbbell Press", Family::PushHorizontal),
    ("Dumbbell Press", Family::PushHorizontal),
    ("Dips", Family::PushHorizontal),
    ("Assisted Dip", Family::PushHorizontal),
    ("Assisted Dips", Family::PushHorizontal),
    ("Dumbbell Pullover", Family::PushHorizontal),
    ("Chest Fly", Family::PushHorizontal),
    ("Standing BTN Press", Family::PushVertical),
    ("BTN Standing Press", Family::PushVertical),
    ("Behind the Neck Press", Family::PushVertical),
    ("Behind the Neck Standing Overhead Press", Family::PushVertical),
    ("Standing OHP", Family::PushVertical),
    ("Overhead Press", Family::PushVertical),
    ("DB Shoulder Press", Family::PushVertical),
    ("Standing Overhead Press", Family::PushVertical),
    ("Bent over Barbell Rows", Family::PullHorizontal),
    ("Bent over barbell row", Family::PullHorizontal),
    ("Cable Rows", Family::PullHorizontal),
    ("Bent Over Row", Family::PullHorizontal),
    ("Seated Cable Rows", Family::PullHorizontal),
    ("Seated Row", Family::PullHorizontal),
    ("Dumbbell Rows", Family::PullHorizontal),
    ("Rear Delt Fly", Family::PullHorizontal),
    ("Pull Ups", Family::PullVertical),
    ("Lat Pulldown", Family::PullVertical),
    ("Assisted Pullup", Family::PullVertical),
    ("Assisted Pullups", Family::PullVertical),
    ("Incline Bicep Curl", Family::Arms),
    ("Barbell Bicep Curl", Family::Arms),
    ("Cable Bicep Curl", Family::Arms),
    ("Cable Tricep Pushdown", Family::Arms),
    ("Bicep Curl", Family::Arms),
    ("Bicep Curls", Family::Arms),
    ("Dumbbell Curls", Family::Arms),
    ("Overhead Tricep Ext", Family::Arms),
    ("Tricep Extension", Family::Arms),
    ("Tricep Pushdown", Family::Arms),
    ("Cable Crunches", Family::Core),
    ("Run", Family::Cardio),
];

// Specific before generic: the vertical press keywords must precede "Press".
const KEYWORDS: &[(&str, Family)] = &[
    ("Behind the Neck", Family::PushVertical),
    ("BTN", Family::PushVertical),
    ("OHP", Family::PushVertical),
    ("Shoulder Press", Family::PushVertical),
    ("Deadlift", Family::Hinge),
    ("RDL", Family::Hinge),
    ("Romanian", Family::Hinge),
    ("Kettlebell", Family::Hinge),
    ("Swing", Family::Hinge),
    ("Squat", Family::Squat),
    ("Bench", Family::PushHorizontal),
    ("Chest Fly", Family::PushHorizontal),
    ("Pullover", Family::PushHorizontal),
    ("Dip", Family::PushHorizontal),
    ("Rear Delt", Family::PullHorizontal),
    ("Row", Family::PullHorizontal),
    ("Pull Up", Family::PullVertical),
    ("Pullup", Family::PullVertical),
    ("Pulldown", Family::PullVertical),
    ("Lat Pull", Family::PullVertical),
    ("Overhead Press", Family::PushVertical),
    ("Press", Family::PushHorizontal),
    ("Fly", Family::PushHorizontal),
    ("Curl", Family::Arms),
    ("Bicep", Family::Arms),
    ("Tricep", Family::Arms),
    ("Crunch", Family::Core),
    ("Ab ", Family::Core),
    ("Run", Family::Cardio),
    ("Cardio", Family::Cardio),
];

static EXACT: LazyLock<HashMap<&'static str, Family>> =
    LazyLock::new(|| EXACT_NAMES.iter().copied().collect());

static KEYWORDS_LOWER: LazyLock<Vec<(String, Family)>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|(kw, family)| (kw.to_lowercase(), *family))
        .collect()
});

/// Map a free-text movement name to its family. Never fails.
pub fn classify(name: &str) -> Family {
    if let Some(family) = EXACT.get(name) {
        return *family;
    }

    let lower = name.to_lowercase();
    KEYWORDS_LOWER
        .iter()
        .find(|(kw, _)| lower.contains(kw.as_str()))
        .map(|(_, family)| *family)
        .unwrap_or(Family::Other)
}
