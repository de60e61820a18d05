//! Structured logging with tracing
//!
//! Subscriber setup for the generator. Console output goes to stderr so
//! that nothing interleaves with generated sources on stdout. The level
//! filter can be overridden through `SVCWIRE_LOG`; a daily-rolling log file
//! is optional.

use std::ffi::OsStr;
use std::path::Path;

use svcwire_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_CONFIG_DIR, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging with the provided configuration
///
/// Fails when the level is not recognized, the log file cannot be opened,
/// or a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers = vec![console_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        layers.push(file_layer(path, config.max_files, config.json_format)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .config_context("Failed to install tracing subscriber")?;

    info!(level = %level, file = ?config.file_output, "Logging initialized");
    Ok(())
}

fn console_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    }
}

/// Layer writing to `<dir>/<stem>.<date>[.<ext>]`, rotated daily
fn file_layer(path: &Path, max_files: usize, json: bool) -> Result<BoxedLayer> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(DEFAULT_CONFIG_DIR);

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix);
    if let Some(extension) = path.extension().and_then(OsStr::to_str) {
        builder = builder.filename_suffix(extension);
    }
    if max_files > 0 {
        builder = builder.max_log_files(max_files);
    }
    let appender = builder
        .build(directory)
        .config_context(format!("Failed to open log file in {}", directory.display()))?;

    let layer = fmt::layer().with_writer(appender).with_ansi(false).with_target(true);
    Ok(if json { layer.json().boxed() } else { layer.boxed() })
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::Configuration {
            message: format!(
                "Invalid log level: {level}. Use trace, debug, info, warn, or error"
            ),
            source: None,
        }),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Log the summary of one generation pass
pub fn log_pass_summary(generated: usize, failed: usize, suppressed: usize) {
    info!(
        generated = generated,
        failed = failed,
        suppressed = suppressed,
        "Generation pass finished"
    );
}
