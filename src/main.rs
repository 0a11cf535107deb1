use std::process::ExitCode;

use ledger_notebook::{app, common::config::Config, common::logging};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Kept alive for the whole run; dropping it flushes and stops the logger.
    let _logger = match logging::init_logging(config.log_level, &config.log_dir) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Error: {}", ledger_notebook::AppError::Logging(err));
            return ExitCode::FAILURE;
        }
    };

    match app::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=command_failed error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
