//! Configuration types for `NoBorders`.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod hotkeys;
pub mod monitor;
pub mod reapply;
pub mod root;
pub mod selection;

pub use hotkeys::{DEFAULT_QUIT_HOTKEY, DEFAULT_TOGGLE_HOTKEY, HotkeysConfig};
pub use monitor::{MonitorConfig, MonitorFallback};
pub use reapply::ReapplyConfig;
pub use root::{
    ConfigError, ConfigLocation, ConfigSource, NoBordersConfig, config_locations, config_paths,
    load_config, load_config_from_path,
};
pub use selection::{AmbiguityPolicy, SelectionConfig};
