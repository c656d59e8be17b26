//! Runtime settings - env-driven defaults and logger wiring
//!
//! Logging severity is explicit state handed to `init_logger`, never
//! process-global mutation scattered through the call sites.

use anyhow::{Context, Result};
use dotenv::dotenv;
use env_logger::Builder;
use log::LevelFilter;
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_root_folder() -> PathBuf {
    PathBuf::from(".")
}

/// Settings read from `MEDIASEED_`-prefixed environment variables,
/// with `.env` support.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_root_folder")]
    pub root_folder: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            root_folder: default_root_folder(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        envy::prefixed("MEDIASEED_")
            .from_env::<Settings>()
            .context("failed to read MEDIASEED_* environment variables")
    }

    /// Minimum severity to record; unknown names fall back to INFO
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Initialize the process logger at the given severity.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: LevelFilter) {
    let _ = Builder::new()
        .format(|buf, record| {
            let ts = buf.timestamp();
            writeln!(
                buf,
                "{} {:<5} {} {}",
                ts,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(level)
        .try_init();
}
