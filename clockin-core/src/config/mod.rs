pub mod theme;

use crate::{
    backend::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS},
    kiosk::DEFAULT_AUTO_RESET,
    staff::StaffRecord,
};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

pub use theme::{NamedColor, ThemeColor, ThemeConfig};

pub const APP_NAME: &str = "clockin";
pub const DEFAULT_TITLE: &str = "Smart Attendance System";

/// Longest a result screen may stay up before returning to idle.
pub const MAX_AUTO_RESET_SECS: u64 = 60 * 60;
/// Longest a single backend request may wait.
pub const MAX_TIMEOUT_MS: u64 = 5 * 60 * 1000;

fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Remote attendance API
    #[default]
    Http,
    /// In-process roster and attendance store, forgotten on exit
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "memory" | "mock" => Ok(Self::Memory),
            _ => Err(format!("unknown backend '{s}': expected 'http' or 'memory'")),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Memory => "memory",
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Which backend answers lookups and records attendance.
    #[serde(default)]
    pub kind: BackendKind,

    /// Base URL of the attendance API, including the `/api` prefix.
    #[serde(default = "BackendConfig::default_base_url")]
    pub base_url: String,

    /// Per-request timeout for the HTTP backend, in milliseconds.
    #[serde(default = "BackendConfig::default_timeout_ms")]
    pub timeout_ms: u64,

    /// Roster for the in-memory backend. A built-in demo roster is used when empty.
    /// ```toml
    /// [[backend.staff]]
    /// staff_id = "STF001"
    /// national_id = "12345678"
    /// first_name = "Grace"
    /// last_name = "Hopper"
    /// ```
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: Self::default_base_url(),
            timeout_ms: Self::default_timeout_ms(),
            staff: Vec::new(),
        }
    }
}

impl BackendConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn default_timeout_ms() -> u64 {
        DEFAULT_TIMEOUT_MS
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct KioskConfig {
    /// Heading on the idle screen.
    #[serde(default = "KioskConfig::default_title")]
    pub title: String,

    /// Seconds the success and error screens stay up before returning to idle.
    #[serde(default = "KioskConfig::default_auto_reset_secs")]
    pub auto_reset_secs: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            auto_reset_secs: Self::default_auto_reset_secs(),
        }
    }
}

impl KioskConfig {
    fn default_title() -> String {
        DEFAULT_TITLE.to_string()
    }

    fn default_auto_reset_secs() -> u64 {
        DEFAULT_AUTO_RESET.as_secs()
    }

    pub fn auto_reset(&self) -> Duration {
        Duration::from_secs(self.auto_reset_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub kiosk: KioskConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_AUTO_RESET_SECS).contains(&self.kiosk.auto_reset_secs) {
            bail!(
                "kiosk.auto_reset_secs must be between 1 and {MAX_AUTO_RESET_SECS} (got {})",
                self.kiosk.auto_reset_secs
            );
        }
        if !(1..=MAX_TIMEOUT_MS).contains(&self.backend.timeout_ms) {
            bail!(
                "backend.timeout_ms must be between 1 and {MAX_TIMEOUT_MS} (got {})",
                self.backend.timeout_ms
            );
        }
        if self.backend.kind == BackendKind::Http
            && !(self.backend.base_url.starts_with("http://")
                || self.backend.base_url.starts_with("https://"))
        {
            bail!(
                "backend.base_url must start with http:// or https:// (got '{}')",
                self.backend.base_url
            );
        }
        let mut seen = HashSet::new();
        for staff in &self.backend.staff {
            if !seen.insert(staff.staff_id.as_str()) {
                bail!("duplicate staff_id '{}' in backend.staff", staff.staff_id);
            }
        }
        Ok(())
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file. An explicit override must exist; the default location may be
/// absent, in which case defaults apply.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => match config_file() {
            Some(path) if path.exists() => path,
            other => {
                log::info!(
                    "no config file at {}, using defaults",
                    other.map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string())
                );
                return Ok(Config::default());
            }
        },
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("reading {}", config_file.display()))?;
    load_config_from_str(&contents).with_context(|| format!("in {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));
        assert_eq!(config.kiosk.auto_reset(), Duration::from_secs(5));
        assert_eq!(config.kiosk.title, DEFAULT_TITLE);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r##"
[backend]
kind = "memory"
timeout_ms = 2500

[[backend.staff]]
staff_id = "STF001"
national_id = "12345678"
first_name = "Grace"
last_name = "Hopper"
department = "Engineering"

[kiosk]
title = "Front Desk"
auto_reset_secs = 8

[theme]
accent = "#336699"
muted = "dark_gray"
"##,
        )
        .unwrap();
        assert_eq!(config.backend.kind, BackendKind::Memory);
        assert_eq!(config.backend.timeout_ms, 2500);
        assert_eq!(config.backend.staff.len(), 1);
        assert_eq!(config.backend.staff[0].department.as_deref(), Some("Engineering"));
        assert!(config.backend.staff[0].position.is_none());
        assert_eq!(config.kiosk.title, "Front Desk");
        assert_eq!(config.kiosk.auto_reset_secs, 8);
        assert_eq!(config.theme.accent, ThemeColor::Rgb(0x33, 0x66, 0x99));
        assert_eq!(config.theme.muted, ThemeColor::Named(NamedColor::DarkGray));
        assert_eq!(config.theme.success, ThemeColor::Named(NamedColor::Green));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(load_config_from_str("[kiosk]\nbanner = \"hi\"\n").is_err());
        assert!(load_config_from_str("colour = \"red\"\n").is_err());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = load_config_from_str("[theme]\naccent = \"mauve\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid color"), "{err}");
    }

    #[test]
    fn test_zero_auto_reset_rejected() {
        assert!(load_config_from_str("[kiosk]\nauto_reset_secs = 0\n").is_err());
    }

    #[test]
    fn test_huge_auto_reset_rejected() {
        let err = load_config_from_str("[kiosk]\nauto_reset_secs = 9223372036854775807\n")
            .unwrap_err();
        assert!(err.to_string().contains("auto_reset_secs"), "{err}");
        assert!(load_config_from_str("[kiosk]\nauto_reset_secs = 3600\n").is_ok());
        assert!(load_config_from_str("[kiosk]\nauto_reset_secs = 3601\n").is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(load_config_from_str("[backend]\ntimeout_ms = 0\n").is_err());
        assert!(load_config_from_str("[backend]\ntimeout_ms = 300000\n").is_ok());
        let err = load_config_from_str("[backend]\ntimeout_ms = 9223372036854775807\n")
            .unwrap_err();
        assert!(err.to_string().contains("timeout_ms"), "{err}");
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        assert!(load_config_from_str("[backend]\nbase_url = \"localhost:5000\"\n").is_err());
        // Irrelevant for the in-memory backend
        assert!(
            load_config_from_str("[backend]\nkind = \"memory\"\nbase_url = \"x\"\n").is_ok()
        );
    }

    #[test]
    fn test_duplicate_staff_rejected() {
        let staff = r#"
[[backend.staff]]
staff_id = "S1"
national_id = "1"
first_name = "A"
last_name = "B"
"#;
        assert!(load_config_from_str(&format!("{staff}{staff}")).is_err());
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("HTTP".parse::<BackendKind>(), Ok(BackendKind::Http));
        assert_eq!("mock".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert!("grpc".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_missing_override_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_override_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[kiosk]\ntitle = \"Lobby\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.kiosk.title, "Lobby");
    }

    #[cfg(unix)]
    #[test]
    fn test_config_dir_respects_xdg_override() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let result = config_file();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        assert_eq!(result, Some(dir.path().join(APP_NAME).join("config.toml")));
    }
}
