use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "VIMGRID_LOG";

const DEFAULT_FILTER: &str = "info";

/// Returns the path of the log file.
/// Location: `~/.local/share/vimgrid/vimgrid.log` (XDG-compliant)
pub fn log_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "vimgrid").context("Could not determine data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("vimgrid.log"))
}

/// Install the global subscriber, appending to the log file.
///
/// The terminal belongs to the UI while the app runs, so nothing is
/// written to stdout or stderr.
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(path)
}

/// Build a filter from `directives`, falling back to `info` when they are
/// missing or invalid.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
