use std::path::PathBuf;

use crate::common::logging::{default_log_level, normalize_level};

pub const LOG_LEVEL_VAR: &str = "LEDGER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LEDGER_LOG_DIR";

/// Process settings that do not come from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        let log_dir = match lookup(LOG_DIR_VAR) {
            Some(dir) if dir.trim().is_empty() => {
                return Err(format!("{LOG_DIR_VAR} cannot be empty"));
            }
            Some(dir) => PathBuf::from(dir.trim()),
            None => PathBuf::from("."),
        };

        Ok(Self { log_level, log_dir })
    }
}
