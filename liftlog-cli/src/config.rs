use anyhow::{Context, Result};
use liftlog_core::{EngineConfig, Milestone, TrackedLift};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_liftlog_home, liftlog_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataSection,
    pub planner: PlannerSection,
    pub tracked_lifts: Vec<TrackedLift>,
    /// Search term -> targets, e.g. `Squat = [{ load = 160.0, reps = 1 }]`
    pub milestones: BTreeMap<String, Vec<Milestone>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSection {
    /// Directory holding session JSON files and the merged log.
    pub dir: PathBuf,
    pub log_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    pub lookback_sessions: usize,
    pub working_rpe: f64,
    pub never_trained_days: i64,
    pub unknown_gap: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_engine(EngineConfig::default())
    }
}

impl Config {
    fn from_engine(engine: EngineConfig) -> Self {
        Self {
            data: DataSection {
                dir: PathBuf::from("data"),
                log_file: "workout_log.csv".to_string(),
            },
            planner: PlannerSection {
                lookback_sessions: engine.lookback_sessions,
                working_rpe: engine.working_rpe,
                never_trained_days: engine.never_trained_days,
                unknown_gap: engine.unknown_gap,
            },
            tracked_lifts: engine.tracked_lifts,
            milestones: engine.milestones,
        }
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            lookback_sessions: self.planner.lookback_sessions,
            working_rpe: self.planner.working_rpe,
            never_trained_days: self.planner.never_trained_days,
            unknown_gap: self.planner.unknown_gap,
            tracked_lifts: self.tracked_lifts.clone(),
            milestones: self.milestones.clone(),
        }
    }

    /// Data directory, with `--data-dir` taking precedence.
    pub fn data_dir(&self, overridden: Option<&Path>) -> PathBuf {
        overridden.map(Path::to_path_buf).unwrap_or_else(|| self.data.dir.clone())
    }

    pub fn log_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data.log_file)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(liftlog_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    parse_config(&fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_liftlog_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::Family;

    #[test]
    fn test_default_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&s).unwrap(), cfg);
        assert_eq!(cfg.engine(), EngineConfig::default());
    }

    #[test]
    fn test_parse_hand_written_config() {
        let cfg = parse_config(
            r#"
tracked_lifts = [
    { term = "Front Squat", family = "squat" },
    { term = "Pull Up", family = "pull-vertical" },
]

[data]
dir = "/srv/training"
log_file = "log.csv"

[planner]
lookback_sessions = 4
working_rpe = 7
never_trained_days = 21
unknown_gap = 0.4

[milestones]
"Front Squat" = [{ load = 120, reps = 3 }]
"#,
        )
        .unwrap();

        assert_eq!(cfg.data.dir, PathBuf::from("/srv/training"));
        assert_eq!(cfg.log_path(&cfg.data_dir(None)), PathBuf::from("/srv/training/log.csv"));
        let engine = cfg.engine();
        assert_eq!(engine.lookback_sessions, 4);
        assert_eq!(engine.working_rpe, 7.0);
        assert_eq!(engine.tracked_lifts[1].family, Family::PullVertical);
        assert_eq!(engine.milestones_for("Front Squat"), &[Milestone::new(120.0, 3)]);
        assert!(engine.milestones_for("Pull Up").is_empty());
    }

    #[test]
    fn test_data_dir_override() {
        let cfg = Config::default();
        assert_eq!(cfg.data_dir(Some(Path::new("elsewhere"))), PathBuf::from("elsewhere"));
        assert_eq!(cfg.data_dir(None), PathBuf::from("data"));
    }
}
