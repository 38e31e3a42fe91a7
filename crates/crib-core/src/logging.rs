//! Tracing setup.
//!
//! The TUI owns stdout/stderr while it runs, so logs go to a daily file
//! under `${CRIB_HOME}/logs`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "CRIB_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_PREFIX: &str = "crib.log";

/// Resolves the filter: `CRIB_LOG`, then config `log_filter`, then `warn`.
pub fn filter_directive(config: &Config) -> String {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Installs the global subscriber writing to `${CRIB_HOME}/logs`.
///
/// Keep the returned guard alive for the life of the process so buffered
/// lines are flushed on exit.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), &filter_directive(config))
}

pub fn init_in(dir: &Path, directive: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter: {directive}"))?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
