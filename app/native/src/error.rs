//! Error types for `NoBorders`.
//!
//! [`NoBordersError`] is the application-level error returned by the CLI and
//! the daemon. The window engine has its own typed errors in
//! [`crate::borderless::error`].

use thiserror::Error;

use crate::borderless::ToggleError;
use crate::config::ConfigError;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum NoBordersError {
    /// Output could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// A window could not be toggled.
    #[error("Toggle error: {0}")]
    ToggleError(String),
    /// No hotkey could be registered.
    #[error("Hotkey error: {0}")]
    HotkeyError(String),
    /// Querying the window manager failed.
    #[error("Platform error: {0}")]
    PlatformError(String),
    /// The command needs the Win32 window manager.
    #[error("'{0}' is only supported on Windows")]
    UnsupportedPlatform(String),
}

impl From<std::io::Error> for NoBordersError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for NoBordersError {
    fn from(err: serde_json::Error) -> Self { Self::SerializationError(err.to_string()) }
}

impl From<ConfigError> for NoBordersError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<ToggleError> for NoBordersError {
    fn from(err: ToggleError) -> Self { Self::ToggleError(err.to_string()) }
}

impl From<crate::borderless::PlatformError> for NoBordersError {
    fn from(err: crate::borderless::PlatformError) -> Self { Self::PlatformError(err.to_string()) }
}
