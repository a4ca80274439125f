//! liftlog-core: movement classification, priority scoring and next-session planning

pub mod accessory;
pub mod config;
pub mod error;
pub mod family;
pub mod milestones;
pub mod planner;
pub mod record;
pub mod report;
pub mod session;

pub use accessory::fill_accessories;
pub use config::EngineConfig;
pub use error::PlanError;
pub use family::{classify, Family};
pub use milestones::{score_families, FamilyScore, Milestone, TrackedLift};
pub use planner::{plan, Focus, Prescription, RecommendationLine};
pub use record::{e1rm, SetRecord, TrainingLog};
pub use report::render_report;
pub use session::{recommend, SessionPlan};
