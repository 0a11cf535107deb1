//! File logging bootstrap and the activity log handed to the ledger.
//!
//! `init_logging` is called once by the binary; it starts `flexi_logger`
//! writing `ledger.log` and returns the handle the caller must keep alive.
//! Library code never installs a logger itself. The `Ledger` receives an
//! `ActivityLog` value at construction and reports through it.

use std::path::Path;

use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::{info, warn};

const LOG_FILE_BASENAME: &str = "ledger";
const ACTIVITY_TARGET: &str = "ledger";

/// Starts file logging at `level` into `<log_dir>/ledger.log`, appending to
/// any previous log.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when `log_dir` cannot be created or the backend fails to start.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;

    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=app_start status=ok level={} log_dir={} version={}",
        level,
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(handle)
}

/// Default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

/// Structured activity events emitted by the ledger.
///
/// Constructed by the caller and moved into `Ledger::new`; `silent()` turns
/// every event into a no-op.
#[derive(Debug, Clone, Copy)]
pub struct ActivityLog {
    enabled: bool,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn silent() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn account_created(&self, name: &str, id: &str, path: &Path) {
        if self.enabled {
            info!(
                target: ACTIVITY_TARGET,
                "event=account_created name={name} id={id} path={}",
                path.display()
            );
        }
    }

    pub fn entry_added(&self, name: &str, line: &str) {
        if self.enabled {
            info!(target: ACTIVITY_TARGET, "event=entry_added name={name} entry={line}");
        }
    }

    pub fn ledger_loaded(&self, id: &str, path: &Path, entries: usize, skipped: usize) {
        if self.enabled {
            info!(
                target: ACTIVITY_TARGET,
                "event=ledger_loaded id={id} path={} entries={entries} skipped={skipped}",
                path.display()
            );
        }
    }

    pub fn record_skipped(&self, path: &Path, line: u64, reason: &str) {
        if self.enabled {
            warn!(
                target: ACTIVITY_TARGET,
                "event=record_skipped path={} line={line} reason={reason}",
                path.display()
            );
        }
    }

    pub fn account_replaced(&self, id: &str, path: &Path) {
        if self.enabled {
            warn!(
                target: ACTIVITY_TARGET,
                "event=account_replaced id={id} path={}",
                path.display()
            );
        }
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let error = normalize_level("loud").unwrap_err();
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn silent_activity_log_is_disabled() {
        assert!(!ActivityLog::silent().is_enabled());
        assert!(ActivityLog::default().is_enabled());
    }
}
