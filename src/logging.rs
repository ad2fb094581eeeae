//! File logging. The terminal is owned by the game screen, so log output
//! only ever goes to a file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the level filter: configured level, else `RUST_LOG`, else `info`
pub fn env_filter(log_level: Option<&str>) -> Result<EnvFilter> {
    match log_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{level}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Install the global subscriber when a log file is configured.
///
/// The returned guard flushes the background writer on drop and must be
/// held until the program exits. Returns `None` when logging is off.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(None);
    };

    let filter = env_filter(config.log_level.as_deref())?;
    let (directory, file_name) = split_log_path(path)?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path {} has no file name", path.display()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((directory, file_name))
}
