//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the dashboard, so log lines go to a file:
//! `--log-file` when given, otherwise `<cache dir>/driver-manager/driver-manager.log`.
//! `RUST_LOG` takes precedence over the `-v` flag.
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app::APP_DIR;
use crate::error::{Context, Result, simple_error};

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(APP_DIR).join("driver-manager.log"))
}

/// `RUST_LOG` if set and valid, else `info` (or `debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(log_file: Option<&Path>, verbose: bool) -> Result<PathBuf> {
    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None => default_log_path().ok_or_else(|| simple_error("no cache directory for the log file"))?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_ctx(|| format!("create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_ctx(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| simple_error(format!("install log subscriber: {e}")))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_to_requested_file() {
        let dir = std::env::temp_dir().join(format!("driver-manager-log-{}", std::process::id()));
        let path = dir.join("nested").join("test.log");
        let used = init_logging(Some(&path), false).unwrap();
        assert_eq!(used, path);
        assert!(path.exists());

        let again = init_logging(Some(&path), false).unwrap_err();
        assert!(again.to_string().starts_with("install log subscriber"));
        let _ = std::fs::remove_dir_all(dir);
    }
}
