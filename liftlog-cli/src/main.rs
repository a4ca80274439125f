use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use liftlog_core::{classify, recommend, render_report};
use liftlog_ingest::{load_log, sync_sessions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "liftlog",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LIFTLOG_BUILD_SHA"), ")"),
    about = "Recommend the next strength session from your training log"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sync new session files, then recommend the next session
    Run {
        /// Directory with session JSON files and the log (default: from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Plan as of this date, YYYY-MM-DD (default: last logged day)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Merge new session JSON files into the training log
    Sync {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Recommend the next session from the existing log, without syncing
    Plan {
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Show which movement family each name falls into
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Write the default config to ~/.liftlog/config.toml
    InitConfig,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run { data_dir, as_of } => {
            let cfg = config::load_config()?;
            let dir = cfg.data_dir(data_dir.as_deref());
            sync(&cfg, &dir)?;
            plan(&cfg, &dir, as_of)?;
        }

        Command::Sync { data_dir } => {
            let cfg = config::load_config()?;
            sync(&cfg, &cfg.data_dir(data_dir.as_deref()))?;
        }

        Command::Plan { data_dir, as_of } => {
            let cfg = config::load_config()?;
            plan(&cfg, &cfg.data_dir(data_dir.as_deref()), as_of)?;
        }

        Command::Classify { names } => {
            for name in &names {
                println!("{:<40} {}", name, classify(name));
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn sync(cfg: &Config, data_dir: &Path) -> Result<()> {
    if !data_dir.is_dir() {
        bail!(
            "data directory not found: {} (pass --data-dir <path>)",
            data_dir.display()
        );
    }

    let log_path = cfg.log_path(data_dir);
    let report = sync_sessions(data_dir, &log_path)
        .with_context(|| format!("syncing sessions into {}", log_path.display()))?;

    if report.records_added > 0 {
        println!(
            "Synced {} new records from {} sessions.",
            report.records_added, report.sessions_added
        );
    } else {
        println!("No new data to sync.");
    }
    for skipped in &report.skipped_files {
        println!("Skipped {}", skipped.display());
    }
    Ok(())
}

fn plan(cfg: &Config, data_dir: &Path, as_of: Option<NaiveDate>) -> Result<()> {
    let log_path = cfg.log_path(data_dir);
    let mut log = load_log(&log_path).with_context(|| format!("loading {}", log_path.display()))?;

    let as_of = match as_of {
        Some(date) => {
            log = log.up_to(date);
            date
        }
        None => match log.latest_date() {
            Some(date) => date,
            None => bail!("training log {} has no sets", log_path.display()),
        },
    };
    info!(%as_of, sets = log.len(), "planning");

    let session = recommend(&log, as_of, &cfg.engine())?;
    print!("{}", render_report(&session));
    Ok(())
}
