//! Logging setup. The TUI owns the terminal, so nothing may write to stdout;
//! all diagnostics go to a daily rotating file under `logs/` instead.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory the rolling appender writes into, relative to the working
/// directory the binary was launched from.
const LOG_DIR: &str = "logs";
/// File name prefix; the appender adds the date suffix.
const LOG_PREFIX: &str = "book-inventory";

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter.
pub fn init() -> Result<()> {
    let log_dir = Path::new(LOG_DIR);
    fs::create_dir_all(log_dir).context("failed to create log directory")?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_PREFIX);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(appender));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
