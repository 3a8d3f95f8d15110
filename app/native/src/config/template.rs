//! Configuration template generation.

use std::fs;
use std::path::Path;

/// Generates a configuration template with every option commented out at
/// its default value.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// NoBorders Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Run `noborders schema` for the full JSON Schema.

{
  // ============================================================================
  // Hotkeys
  // ============================================================================
  // Modifiers: Ctrl, Alt, Shift, Win. An empty string disables a shortcut.
  // "hotkeys": {
  //   // Toggle the focused window between windowed and borderless fullscreen
  //   "toggle": "Ctrl+Alt+Enter",
  //
  //   // Restore every borderless window and quit
  //   "quit": "Ctrl+Alt+Shift+Q"
  // },

  // ============================================================================
  // Window Selection
  // ============================================================================
  // "selection": {
  //   // "preferForeground": use the focused window of the process, else its topmost
  //   // "strict": refuse when a process has several windows
  //   "ambiguity": "preferForeground"
  // },

  // ============================================================================
  // Monitor Placement
  // ============================================================================
  // "monitor": {
  //   // Used when the window is minimized or off-screen:
  //   // "lastKnownBounds", "primary" or "fail"
  //   "fallback": "lastKnownBounds"
  // },

  // ============================================================================
  // Re-apply to New Windows
  // ============================================================================
  // "reapply": {
  //   // Make new windows of a borderless process borderless too
  //   "enabled": true,
  //
  //   // How often to check for new and closed windows, in milliseconds
  //   "intervalMs": 3000
  // },

  // Log filter (overridden by the NOBORDERS_LOG environment variable)
  // "logLevel": "info"
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
