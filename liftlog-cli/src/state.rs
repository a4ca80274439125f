use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$LIFTLOG_HOME`, else `~/.liftlog`.
pub fn liftlog_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("LIFTLOG_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".liftlog"))
}

pub fn ensure_liftlog_home() -> Result<PathBuf> {
    let dir = liftlog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
