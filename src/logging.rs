// File logging

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "planto.log";

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed. `RUST_LOG` overrides `level`.
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("planto={level}")))
        .unwrap_or_else(|_| EnvFilter::new("planto=info"))
}

