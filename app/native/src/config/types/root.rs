//! Root configuration type and file loading.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HotkeysConfig, MonitorConfig, ReapplyConfig, SelectionConfig};

/// Root configuration structure for `NoBorders`.
///
/// Every section is optional; a missing or empty file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NoBordersConfig {
    /// Global keyboard shortcuts.
    pub hotkeys: HotkeysConfig,

    /// How a process with several windows is resolved to one.
    pub selection: SelectionConfig,

    /// Which monitor a window is placed on when it is not visible.
    pub monitor: MonitorConfig,

    /// Automatic re-application to new windows of borderless processes.
    pub reapply: ReapplyConfig,

    /// Log filter, e.g. `"debug"` or `"noborders_lib=trace"`.
    /// Overridden by the `NOBORDERS_LOG` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/noborders/config.json or ~/.noborders.json"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names directly in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".noborders.jsonc", ".noborders.json"];

/// Where a configuration search location comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `$XDG_CONFIG_HOME/noborders`.
    XdgConfigHome,
    /// `~/.config/noborders`.
    DotConfig,
    /// The platform config directory (`%APPDATA%\noborders` on Windows).
    PlatformConfigDir,
    /// A dotfile in the home directory.
    Home,
}

impl ConfigSource {
    /// Short label for listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XdgConfigHome => "$XDG_CONFIG_HOME",
            Self::DotConfig => "~/.config",
            Self::PlatformConfigDir if cfg!(windows) => "%APPDATA%",
            Self::PlatformConfigDir => "config dir",
            Self::Home => "home",
        }
    }
}

/// One candidate configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub source: ConfigSource,
    pub path: PathBuf,
}

/// Returns the configuration search locations in priority order.
///
/// 1. `$XDG_CONFIG_HOME/noborders/config.jsonc` or `config.json`, if set
/// 2. `~/.config/noborders/config.jsonc` or `config.json`
/// 3. `<platform config dir>/noborders/config.jsonc` or `config.json`
///    (`%APPDATA%` on Windows)
/// 4. `~/.noborders.jsonc` or `~/.noborders.json`
///
/// A path reachable through several sources is listed once, under the first.
#[must_use]
pub fn config_locations() -> Vec<ConfigLocation> {
    let mut locations: Vec<ConfigLocation> = Vec::new();
    let mut push = |source: ConfigSource, path: PathBuf| {
        if !locations.iter().any(|location| location.path == path) {
            locations.push(ConfigLocation { source, path });
        }
    };

    let mut roots = Vec::new();
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        roots.push((ConfigSource::XdgConfigHome, PathBuf::from(xdg_config)));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push((ConfigSource::DotConfig, home.join(".config")));
    }
    if let Some(config_dir) = dirs::config_dir() {
        roots.push((ConfigSource::PlatformConfigDir, config_dir));
    }

    for (source, dir) in roots {
        for filename in CONFIG_FILE_NAMES {
            push(source, dir.join("noborders").join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            push(ConfigSource::Home, home.join(filename));
        }
    }

    locations
}

/// Returns the possible configuration file paths in priority order.
///
/// See [`config_locations`].
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    config_locations().into_iter().map(|location| location.path).collect()
}

/// Loads the configuration from the first existing file in [`config_paths`].
///
/// # Errors
///
/// - `ConfigError::NotFound` if no configuration file exists
/// - `ConfigError::IoError` if a file exists but could not be read
/// - `ConfigError::ParseError` if the file contains invalid JSON
pub fn load_config() -> Result<(NoBordersConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

/// Loads the configuration from a specific file.
///
/// Comments (`//` and `/* */`) are stripped before parsing.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file cannot be read and
/// `ConfigError::ParseError` if it contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<(NoBordersConfig, PathBuf), ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: NoBordersConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::{AmbiguityPolicy, MonitorFallback};

    #[test]
    fn test_default_config() {
        let config = NoBordersConfig::default();
        assert_eq!(config.hotkeys.toggle, "Ctrl+Alt+Enter");
        assert_eq!(config.selection.ambiguity, AmbiguityPolicy::PreferForeground);
        assert_eq!(config.monitor.fallback, MonitorFallback::LastKnownBounds);
        assert!(config.reapply.enabled);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: NoBordersConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, NoBordersConfig::default());
    }

    #[test]
    fn test_load_jsonc_with_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                // toggle with F11
                "hotkeys": {{ "toggle": "F11" }},
                /* strict resolution */
                "selection": {{ "ambiguity": "strict" }},
                "monitor": {{ "fallback": "primary" }},
                "reapply": {{ "enabled": false, "intervalMs": 1000 }},
                "logLevel": "debug"
            }}"#
        )
        .unwrap();

        let (config, path) = load_config_from_path(file.path()).unwrap();
        assert_eq!(path, file.path());
        assert_eq!(config.hotkeys.toggle, "F11");
        assert_eq!(config.hotkeys.quit, "Ctrl+Alt+Shift+Q");
        assert_eq!(config.selection.ambiguity, AmbiguityPolicy::Strict);
        assert_eq!(config.monitor.fallback, MonitorFallback::Primary);
        assert!(!config.reapply.enabled);
        assert_eq!(config.reapply.interval_ms, 1000);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "selection": {{ "ambiguity": "sometimes" }} }}"#).unwrap();

        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse configuration file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_locations_are_unique_and_labelled() {
        let locations = config_locations();
        for (i, location) in locations.iter().enumerate() {
            assert!(!location.source.label().is_empty());
            assert!(locations[i + 1..].iter().all(|other| other.path != location.path));
        }
        assert_eq!(
            locations.iter().map(|location| location.path.clone()).collect::<Vec<_>>(),
            config_paths()
        );
        assert_eq!(locations.last().unwrap().source, ConfigSource::Home);
    }

    #[test]
    fn test_config_paths_order() {
        let paths = config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("noborders")));

        let last = paths.last().unwrap();
        assert_eq!(last.file_name().unwrap(), ".noborders.json");
    }
}
