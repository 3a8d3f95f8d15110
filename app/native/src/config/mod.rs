//! Configuration module for `NoBorders`.
//!
//! The configuration is loaded once at startup and shared through a global
//! instance. The file supports JSONC format (JSON with comments).

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    AmbiguityPolicy, ConfigError, ConfigLocation, ConfigSource, DEFAULT_QUIT_HOTKEY,
    DEFAULT_TOGGLE_HOTKEY, HotkeysConfig, MonitorConfig, MonitorFallback, NoBordersConfig,
    ReapplyConfig, SelectionConfig, config_locations, config_paths,
    load_config as load_config_default, load_config_from_path,
};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<NoBordersConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Error from the last load, kept until logging is initialized.
static LOAD_ERROR: OnceLock<String> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` or `get_config()` to take effect.
///
/// Returns `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the custom configuration path, if one was set.
pub fn custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Loads the configuration from disk, falling back to defaults.
///
/// If no configuration file exists, a commented template is written to the
/// preferred location.
fn load_or_default() -> NoBordersConfig {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            create_default_config_file();
            NoBordersConfig::default()
        }
        Err(err) => {
            let _ = LOAD_ERROR.set(err.to_string());
            NoBordersConfig::default()
        }
    }
}

/// Writes the template configuration file to the first search path.
fn create_default_config_file() {
    let Some(config_path) = config_paths().into_iter().next() else {
        return;
    };

    if config_path.exists() {
        return;
    }

    if template::create_config_file(&config_path).is_ok() {
        let _ = CONFIG_PATH.set(config_path);
    }
}

/// Initializes and returns the global configuration instance.
///
/// Idempotent: later calls return the same instance.
pub fn init() -> &'static NoBordersConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static NoBordersConfig { CONFIG.get_or_init(load_or_default) }

/// Logs a deferred load error, if the configuration fell back to defaults.
///
/// Loading happens before the subscriber exists, since the log filter is
/// itself configurable.
pub fn report_load_error() {
    if let Some(err) = LOAD_ERROR.get() {
        tracing::warn!(error = %err, "failed to load configuration, using defaults");
    }
    if let Some(path) = CONFIG_PATH.get() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }
}
