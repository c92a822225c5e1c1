//! Logging utilities
//!
//! Tracing setup plus the session log-file header written once per start.

use std::fs;

use tracing_subscriber::EnvFilter;

use crate::error::{AppResult, FileError};

/// Initializes the global tracing subscriber. Safe to call more than once;
/// later calls are no-ops.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Writes the session header to the log file, truncating a previous session.
pub fn init_session_log(log_file_path: &str) -> AppResult<()> {
    let header = format!(
        "{}\nBatch conversion log - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, header).map_err(|e| FileError::write_failed(log_file_path, e))?;
    Ok(())
}
