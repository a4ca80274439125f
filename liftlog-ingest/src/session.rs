//! Session JSON files.
//!
//! Files are named after the session start, e.g. `20260305_183000.json`
//! (an optional suffix such as `20260305_183000_upper.json` is allowed).
//! Each holds a JSON array of set objects:
//!
//!   [{"Timestamp": "2026-03-05 18:30:00", "Movement": "Back Squat",
//!     "Load_kg": 100, "Reps": 5, "Intensity_RPE": 8}]

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::SessionEntry;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static SESSION_STEM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<ts>\d{8}_\d{6})(?:_.*)?$").ok());

/// Session start encoded in the file name, formatted like a log timestamp.
pub fn session_timestamp_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let caps = SESSION_STEM.as_ref()?.captures(stem)?;

    NaiveDateTime::parse_from_str(&caps["ts"], "%Y%m%d_%H%M%S")
        .ok()
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
}

pub fn read_session_file(path: &Path) -> Result<Vec<SessionEntry>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}
