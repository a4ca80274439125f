//! End-to-end recommendation: score, plan, fill, in one call.

use chrono::NaiveDate;
use tracing::info;

use crate::accessory::fill_accessories;
use crate::config::EngineConfig;
use crate::error::PlanError;
use crate::family::Family;
use crate::milestones::{score_families, FamilyScore};
use crate::planner::{plan, Focus, RecommendationLine};
use crate::record::TrainingLog;

/// Everything the report needs about one recommended session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub as_of: NaiveDate,
    pub focus: Focus,
    /// Highest score first; the order focus selection used.
    pub scores: Vec<FamilyScore>,
    pub lines: Vec<RecommendationLine>,
}

impl SessionPlan {
    pub fn focus_families(&self) -> Vec<Family> {
        self.focus.families()
    }
}

/// Recommend the next session from `log` as seen on `as_of`.
pub fn recommend(log: &TrainingLog, as_of: NaiveDate, config: &EngineConfig) -> Result<SessionPlan, PlanError> {
    if log.is_empty() {
        return Err(PlanError::EmptyLog);
    }

    let scores = score_families(log, as_of, config);
    let (focus, mut lines) = plan(log, &scores, config).ok_or(PlanError::NoScoredFamilies)?;
    lines.extend(fill_accessories(log, &focus));

    info!(sets = log.len(), lines = lines.len(), %as_of, "planned session");

    Ok(SessionPlan {
        as_of,
        focus,
        scores,
        lines,
    })
}
