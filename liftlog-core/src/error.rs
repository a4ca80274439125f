//! Planning errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("training log is empty; sync some sessions first")]
    EmptyLog,

    #[error("no tracked lifts configured; nothing to score")]
    NoScoredFamilies,
}
