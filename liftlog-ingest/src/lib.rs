//! liftlog-ingest: JSON session files and the merged CSV training log.

pub mod log_store;
pub mod session;
pub mod types;

pub use log_store::{load_log, sync_sessions, SyncReport};
pub use session::{read_session_file, session_timestamp_from_filename};
pub use types::{LogRow, SessionEntry};
