mod config;
pub mod database;

pub use config::{Config, LogConfig, TimerSettings};
pub use database::{Database, SessionRecord, SessionRecorder, Stats};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/studytimer[-dev]/` based on STUDYTIMER_ENV, creating it.
///
/// Set STUDYTIMER_ENV=dev to use the development data directory.
/// STUDYTIMER_HOME, when set, is used as-is.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Location of the data directory, without touching the filesystem.
pub(crate) fn data_dir_path() -> PathBuf {
    match std::env::var_os("STUDYTIMER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studytimer-dev")
            } else {
                base_dir.join("studytimer")
            }
        }
    }
}
