use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var naming a file to log into instead of stderr
pub const LOG_FILE_ENV: &str = "ODH_LOG_FILE";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for a command-line tool.
///
/// `RUST_LOG` controls the filter (default `info`). Output goes to stderr,
/// or to the file named by `ODH_LOG_FILE` when set.
pub fn init_tracing_with_service(service_name: &str) -> Result<()> {
    if let Some(log_path) = std::env::var(LOG_FILE_ENV).ok().filter(|p| !p.is_empty()) {
        return init_file_tracing(service_name, Path::new(&log_path));
    }

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("Tracing subscriber already installed")?;

    tracing::debug!(service = service_name, "tracing initialized");
    Ok(())
}

/// Log into `log_path` without ANSI colors. Used by the TUI, which owns the
/// terminal and cannot share stderr.
pub fn init_file_tracing(service_name: &str, log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .context("Tracing subscriber already installed")?;

    tracing::debug!(service = service_name, path = %log_path.display(), "file logging enabled");
    Ok(())
}
