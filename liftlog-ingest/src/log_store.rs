//! The merged CSV training log: load it for planning, sync new sessions into it.
//!
//! Header: Timestamp,Movement,Load_kg,Reps,Intensity_RPE,e1RM

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use liftlog_core::{e1rm, SetRecord, TrainingLog};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::session::{read_session_file, session_timestamp_from_filename, TIMESTAMP_FORMAT};
use crate::types::{LogRow, SessionEntry};

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub files_seen: usize,
    pub sessions_added: usize,
    pub records_added: usize,
    /// Unreadable, empty, or undated session files.
    pub skipped_files: Vec<PathBuf>,
}

/// Parse a log timestamp; date-only values land at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn read_rows(path: &Path) -> Result<Vec<LogRow>> {
    let mut rdr = csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<LogRow>().enumerate() {
        let row = result.with_context(|| format!("{} row {}", path.display(), i + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[LogRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn to_record(row: &LogRow) -> Result<SetRecord> {
    let Some(timestamp) = parse_timestamp(&row.timestamp) else {
        bail!("unparseable timestamp '{}' for {}", row.timestamp, row.movement);
    };
    if row.reps == 0 {
        bail!("zero reps logged for {} at {}", row.movement, row.timestamp);
    }
    Ok(SetRecord {
        timestamp,
        movement: row.movement.trim().to_string(),
        load: row.load_kg,
        reps: row.reps,
        rpe: row.intensity_rpe,
    })
}

/// Load the merged log for planning. The stored e1RM column is ignored.
pub fn load_log(path: impl AsRef<Path>) -> Result<TrainingLog> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("training log not found: {} (run: liftlog sync)", path.display());
    }

    let records = read_rows(path)?
        .iter()
        .enumerate()
        .map(|(i, row)| to_record(row).with_context(|| format!("{} row {}", path.display(), i + 1)))
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = records.len(), path = %path.display(), "loaded training log");
    Ok(TrainingLog::new(records))
}

fn session_json_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(data_dir)
        .with_context(|| format!("read {}", data_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn non_empty(ts: Option<&str>) -> Option<String> {
    ts.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn to_row(entry: &SessionEntry, timestamp: String) -> LogRow {
    LogRow {
        timestamp,
        movement: entry.movement.clone(),
        load_kg: entry.load_kg,
        reps: entry.reps,
        intensity_rpe: entry.intensity_rpe,
        e1rm: Some(e1rm(entry.load_kg, entry.reps)),
    }
}

/// Merge every new session file in `data_dir` into the CSV log at `log_path`.
///
/// A session is keyed by its first record's timestamp (else the filename
/// timestamp) and skipped if that key is already in the log. The log is only
/// rewritten when something new was found.
pub fn sync_sessions(data_dir: impl AsRef<Path>, log_path: impl AsRef<Path>) -> Result<SyncReport> {
    let data_dir = data_dir.as_ref();
    let log_path = log_path.as_ref();

    let mut rows = if log_path.exists() {
        read_rows(log_path)?
    } else {
        Vec::new()
    };
    let mut seen: HashSet<String> = rows.iter().map(|r| r.timestamp.trim().to_string()).collect();

    let mut report = SyncReport::default();
    let mut new_rows = Vec::new();

    for file in session_json_files(data_dir)? {
        report.files_seen += 1;
        let file_ts = session_timestamp_from_filename(&file);

        let entries = match read_session_file(&file) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable session file");
                report.skipped_files.push(file);
                continue;
            }
        };
        let Some(first) = entries.first() else {
            debug!(file = %file.display(), "empty session file");
            report.skipped_files.push(file);
            continue;
        };

        let Some(session_ts) = non_empty(first.timestamp.as_deref()).or_else(|| file_ts.clone()) else {
            warn!(file = %file.display(), "session has no timestamp and filename carries none");
            report.skipped_files.push(file);
            continue;
        };
        if seen.contains(&session_ts) {
            debug!(file = %file.display(), %session_ts, "session already in log");
            continue;
        }

        for entry in &entries {
            let ts = non_empty(entry.timestamp.as_deref())
                .or_else(|| file_ts.clone())
                .unwrap_or_else(|| session_ts.clone());
            new_rows.push(to_row(entry, ts));
        }
        report.sessions_added += 1;
        report.records_added += entries.len();
        seen.insert(session_ts);
    }

    if new_rows.is_empty() {
        info!(log = %log_path.display(), "no new sessions to sync");
        return Ok(report);
    }

    rows.extend(new_rows);
    write_rows(log_path, &rows)?;
    info!(
        sessions = report.sessions_added,
        records = report.records_added,
        log = %log_path.display(),
        "synced new sessions"
    );
    Ok(report)
}
