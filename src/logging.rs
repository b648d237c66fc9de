//! Logging configuration and initialization for Vidshelf.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// sqlx logs every statement at info; keep only slow-query warnings.
const SQLX_QUERY_DIRECTIVE: &str = "sqlx::query=warn";

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives derived from the configured level.
fn filter_directives(level: &str) -> String {
    format!(
        "{},{}",
        parse_level(level).as_str().to_lowercase(),
        SQLX_QUERY_DIRECTIVE
    )
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}

/// Open the log file for appending, creating its directory if needed.
///
/// Returns `None` for an empty path.
fn open_log_file(path: &str) -> Result<Option<File>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Some(file))
}

/// Initialize the logging system with the given configuration.
///
/// Logs go to stdout and are appended to `config.file`. An empty `file`
/// means console only.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let Some(log_file) = open_log_file(&config.file)? else {
        init_console_only(&config.level);
        return Ok(());
    };

    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .init();

    Ok(())
}

/// Initialize console-only logging.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(build_filter(level))
        .init();
}
