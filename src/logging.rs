//! Tracing subscriber set-up for the command line tool

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{APP_NAME, LogConfig, log_dir};

/// Build the filter from `RUST_LOG`, falling back to the configured level
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging.
///
/// Logs go to stderr, or as JSON to a daily rolling file in [`log_dir`] when
/// `to_file` is set. The returned guard must be held until exit so buffered file
/// output is flushed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = env_filter(&config.level);

    if !config.to_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .try_init()?;
        return Ok(None);
    }

    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        dir,
        format!("{APP_NAME}.log"),
    ));

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(writer).with_target(true))
        .with(filter)
        .try_init()?;

    Ok(Some(guard))
}
