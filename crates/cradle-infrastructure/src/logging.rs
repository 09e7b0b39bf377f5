//! Structured logging with tracing
//!
//! Stdout output (plain or JSON) plus an optional daily-rolling file. The
//! `CRADLE_LOG` environment variable overrides the configured level with any
//! `EnvFilter` directive.

use std::path::Path;

use cradle_domain::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_PREFIX, LOG_ENV_VAR};

/// Initialize logging with the provided configuration
///
/// # Errors
///
/// Fails for an unknown level or if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE_PREFIX)),
        )
    });

    // layer types differ per format, hence the separate branches
    let registry = Registry::default().with(filter);
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_thread_names(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        registry.with(stdout).with(file).try_init()
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        registry.with(stdout).with(file).try_init()
    };

    installed.map_err(|err| Error::configuration(format!("Failed to install logger: {err}")))?;
    info!(level = %level, json = config.json_format, "Logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
///
/// # Errors
///
/// Returns [`Error::Configuration`] for anything but the five level names.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}
