use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// The log file name for the dashboard.
const LOG_FILE: &str = "greenprompt.log";

/// Console filter when `RUST_LOG` is not set; stdout is reserved for the dashboard itself.
const DEFAULT_CONSOLE_FILTER: &str = "warn";

const FILE_FILTER: &str = "info,greenprompt_client=debug,greenprompt_dashboard=debug";

/// Configure logging with JSON formatting to a daily rolling file, and compact console
/// output on stderr.
///
/// The returned guard must be kept alive for the duration of the program, otherwise
/// buffered file logs are lost.
///
/// # Errors
///
/// Returns an error if:
/// - Failed to create the logs directory
/// - Failed to set global default subscriber
pub fn setup_logging<P: AsRef<Path>>(logs_dir: P) -> Result<WorkerGuard> {
    let logs_dir = logs_dir.as_ref();
    std::fs::create_dir_all(logs_dir).context("Failed to create logs directory")?;

    let appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE);
    let (file_writer, guard) = non_blocking(appender);

    let file_layer = fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new(FILE_FILTER));

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to set global default subscriber")?;

    Ok(guard)
}
