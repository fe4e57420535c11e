//! File-based logging.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily
//! rolling file under `logging.directory`.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{self, LoggingSettings};

const LOG_FILE_PREFIX: &str = "riffle.log";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.filter`. The returned guard flushes pending
/// records when dropped and must live until shutdown.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<WorkerGuard> {
    let dir = settings
        .directory
        .clone()
        .or_else(config::default_log_dir)
        .ok_or_else(|| anyhow::anyhow!("no log directory: set logging.directory or HOME"))?;
    fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
