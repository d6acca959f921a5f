//! Logging Infrastructure
//!
//! `RUST_LOG` wins over `LOG_LEVEL`; with neither set the filter is
//! `gym_server=info,tower_http=info`. Output goes to stdout, or to a daily
//! rolling file when a log directory exists.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "gym_server=info,tower_http=info";

/// Initialize the logger with defaults
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional level, JSON output and file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!("gym_server={level},tower_http={level}")),
        None => EnvFilter::new(DEFAULT_FILTER),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    let appender = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .and_then(|p| p.to_str())
        .map(|dir| tracing_appender::rolling::daily(dir, "gym-server"));

    let result = match (appender, json) {
        (Some(file), true) => builder.json().with_writer(file).try_init(),
        (Some(file), false) => builder.with_ansi(false).with_writer(file).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
