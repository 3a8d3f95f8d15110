//! Global shortcut configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default shortcut for toggling the focused window.
pub const DEFAULT_TOGGLE_HOTKEY: &str = "Ctrl+Alt+Enter";

/// Default shortcut for restoring all windows and exiting.
pub const DEFAULT_QUIT_HOTKEY: &str = "Ctrl+Alt+Shift+Q";

/// Keyboard shortcuts registered by the daemon.
///
/// Shortcuts are written as modifier names and a key joined by `+`, for
/// example `"Ctrl+Alt+Enter"` or `"Win+F11"`. An empty string disables the
/// shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HotkeysConfig {
    /// Toggles the focused window between windowed and borderless.
    /// Default: "Ctrl+Alt+Enter"
    pub toggle: String,

    /// Restores every borderless window and stops the daemon.
    /// Default: "Ctrl+Alt+Shift+Q"
    pub quit: String,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            toggle: DEFAULT_TOGGLE_HOTKEY.to_string(),
            quit: DEFAULT_QUIT_HOTKEY.to_string(),
        }
    }
}

impl HotkeysConfig {
    /// Returns the configured shortcuts paired with their action names,
    /// skipping disabled ones.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&'static str, &str)> {
        [("toggle", self.toggle.as_str()), ("quit", self.quit.as_str())]
            .into_iter()
            .filter(|(_, shortcut)| !shortcut.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_default() {
        let config = HotkeysConfig::default();
        assert_eq!(config.toggle, "Ctrl+Alt+Enter");
        assert_eq!(config.quit, "Ctrl+Alt+Shift+Q");
        assert_eq!(config.bindings().len(), 2);
    }

    #[test]
    fn test_partial_hotkeys_use_defaults() {
        let config: HotkeysConfig = serde_json::from_str(r#"{"toggle": "F11"}"#).unwrap();
        assert_eq!(config.toggle, "F11");
        assert_eq!(config.quit, DEFAULT_QUIT_HOTKEY);
    }

    #[test]
    fn test_empty_shortcut_is_disabled() {
        let config = HotkeysConfig { quit: String::new(), ..Default::default() };
        assert_eq!(config.bindings(), vec![("toggle", "Ctrl+Alt+Enter")]);
    }
}
