//! Structured logging setup using the `tracing` ecosystem.
//!
//! Console output goes to stderr so table and JSON output on stdout stay
//! clean. File output rotates daily and can be written as JSON.

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::rolling;

use crate::constants::LOG_FILE_NAME;
use crate::error::DonorResult;

/// Initialize the global tracing subscriber with the given settings.
///
/// # Arguments
/// * `level` - Log level or filter directive: "trace", "debug", "info", "warn", "error"
/// * `log_dir` - Directory for log files
/// * `json_output` - If true, use JSON format for file output
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> DonorResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    if json_output {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    }

    tracing::debug!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize a minimal console-only logger for testing or simple CLI usage.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init();
}
