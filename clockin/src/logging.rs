use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "clockin";
const LOG_FILE_NAME: &str = "clockin.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// `$XDG_CACHE_HOME/clockin`, else `~/.cache/clockin`. An empty XDG value counts as unset.
#[cfg_attr(windows, allow(dead_code))]
fn resolve_cache_dir(xdg_cache_home: Option<&str>, home: Option<&Path>) -> Option<PathBuf> {
    match xdg_cache_home {
        Some(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg).join(APP_NAME)),
        _ => home.map(|home| home.join(".cache").join(APP_NAME)),
    }
}

pub fn cache_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        let xdg = std::env::var("XDG_CACHE_HOME").ok();
        resolve_cache_dir(xdg.as_deref(), dirs::home_dir().as_deref())
    }
    #[cfg(windows)]
    {
        Some(
            dirs::cache_dir().map_or_else(|| std::env::temp_dir().join(APP_NAME), |c| c.join(APP_NAME)),
        )
    }
}

fn log_file_in(cache_dir: Option<PathBuf>) -> Result<PathBuf> {
    cache_dir
        .map(|dir| dir.join(LOG_FILE_NAME))
        .context("unable to find a cache directory for logs (is HOME set?)")
}

/// Send `log` output to the cache file; the terminal belongs to the TUI.
pub fn setup_logging(level: log::LevelFilter) -> Result<PathBuf> {
    let log_file = log_file_in(cache_dir())?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("clockin logging initialised (level={level})");
    Ok(log_file)
}
