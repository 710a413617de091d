//! Logging init: append to a file under the XDG state dir, or fall back to stderr.
//!
//! Filter comes from `RUST_LOG`, defaulting to `info,dlcheck=debug`.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,dlcheck=debug";
const LOG_DIR: &str = "dlcheck";
const LOG_FILE: &str = "dlcheck.log";

/// Directives to use for a given `RUST_LOG` value; unset or blank means the default.
pub fn filter_directives(rust_log: Option<&str>) -> &str {
    match rust_log.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_FILTER,
    }
}

fn env_filter() -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(from_env.as_deref());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<state_home>/dlcheck/dlcheck.log`.
pub fn log_file_path(state_home: &Path) -> PathBuf {
    state_home.join(LOG_DIR).join(LOG_FILE)
}

/// Create the log directory if needed and open the log file for appending.
pub fn open_log_file(state_home: &Path) -> Result<(File, PathBuf)> {
    let path = log_file_path(state_home);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    Ok((file, path))
}

/// Initialize structured logging to `~/.local/state/dlcheck/dlcheck.log` and
/// return the log path. On failure (e.g. state dir unwritable) the caller
/// should fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::new()?;
    let (file, path) = open_log_file(&xdg_dirs.get_state_home())?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("dlcheck logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only (no file). Use when `init_logging()` fails.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
