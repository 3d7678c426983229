//! Tracing subscriber setup.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks info, debug or
/// trace. With `log_file` the same events are mirrored, without colors,
/// to that file. The returned guard must live until exit so buffered file
/// output is flushed.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()
            .context("Failed to install logger")?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("Failed to install logger")?;
    Ok(Some(guard))
}
