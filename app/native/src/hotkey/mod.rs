//! Global hotkeys for the `NoBorders` daemon.
//!
//! Shortcuts are read from the configuration as strings such as
//! `"Ctrl+Alt+Enter"` and parsed into a modifier mask and virtual-key code.
//! On Windows the [`win32`] module registers them with the system and runs
//! the message loop that receives them.

#[cfg(windows)]
pub mod win32;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use crate::config::HotkeysConfig;

/// `MOD_ALT`.
pub const MOD_ALT: u32 = 0x0001;
/// `MOD_CONTROL`.
pub const MOD_CONTROL: u32 = 0x0002;
/// `MOD_SHIFT`.
pub const MOD_SHIFT: u32 = 0x0004;
/// `MOD_WIN`.
pub const MOD_WIN: u32 = 0x0008;

/// Errors that can occur when parsing a shortcut string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    /// The shortcut string is empty.
    #[error("shortcut is empty")]
    Empty,

    /// A part of the shortcut is not a known modifier or key.
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    /// The shortcut has only modifiers.
    #[error("shortcut '{0}' has no key")]
    MissingKey(String),

    /// The shortcut has more than one non-modifier key.
    #[error("shortcut '{0}' has more than one key")]
    MultipleKeys(String),

    /// The shortcut has no modifier; a bare key would swallow normal typing.
    #[error("shortcut '{0}' needs at least one modifier")]
    MissingModifier(String),
}

/// A parsed global shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Combination of `MOD_*` flags.
    pub modifiers: u32,
    /// Virtual-key code.
    pub key: u32,
}

impl Shortcut {
    #[must_use]
    pub const fn new(modifiers: u32, key: u32) -> Self { Self { modifiers, key } }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(shortcut: &str) -> Result<Self, Self::Err> {
        if shortcut.trim().is_empty() {
            return Err(ShortcutError::Empty);
        }

        let mut modifiers = 0;
        let mut key = None;

        for part in shortcut.split('+').map(str::trim) {
            if let Some(modifier) = parse_modifier(part) {
                modifiers |= modifier;
                continue;
            }

            let code = parse_key(part).ok_or_else(|| ShortcutError::UnknownKey(part.to_string()))?;
            if key.replace(code).is_some() {
                return Err(ShortcutError::MultipleKeys(shortcut.to_string()));
            }
        }

        let key = key.ok_or_else(|| ShortcutError::MissingKey(shortcut.to_string()))?;
        let is_function_key = (VK_F1..=VK_F24).contains(&key);
        if modifiers == 0 && !is_function_key {
            return Err(ShortcutError::MissingModifier(shortcut.to_string()));
        }

        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [(MOD_CONTROL, "Ctrl"), (MOD_ALT, "Alt"), (MOD_SHIFT, "Shift"), (MOD_WIN, "Win")] {
            if self.modifiers & flag != 0 {
                write!(f, "{name}+")?;
            }
        }
        match key_name(self.key) {
            Some(name) => f.write_str(&name),
            None => write!(f, "0x{:02X}", self.key),
        }
    }
}

/// What a registered hotkey does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Toggle the focused window.
    Toggle,
    /// Restore every window and stop the daemon.
    Quit,
}

impl HotkeyAction {
    const fn from_name(name: &str) -> Option<Self> {
        match name.as_bytes() {
            b"toggle" => Some(Self::Toggle),
            b"quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A shortcut bound to an action, with the id it is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub id: i32,
    pub action: HotkeyAction,
    pub shortcut: Shortcut,
}

/// Parses the configured shortcuts.
///
/// Invalid shortcuts are logged and skipped so that one typo does not
/// disable the other bindings.
#[must_use]
pub fn bindings_from_config(config: &HotkeysConfig) -> Vec<HotkeyBinding> {
    let mut bindings = Vec::new();

    for (name, text) in config.bindings() {
        let Some(action) = HotkeyAction::from_name(name) else {
            continue;
        };
        match text.parse::<Shortcut>() {
            Ok(shortcut) => {
                let id = i32::try_from(bindings.len()).unwrap_or(i32::MAX) + 1;
                bindings.push(HotkeyBinding { id, action, shortcut });
            }
            Err(err) => {
                tracing::warn!(hotkey = name, shortcut = text, error = %err, "invalid shortcut");
            }
        }
    }

    bindings
}

// ============================================================================
// Console Teardown
// ============================================================================

/// `CTRL_CLOSE_EVENT`.
pub const CTRL_CLOSE_EVENT: u32 = 2;
/// `CTRL_LOGOFF_EVENT`.
pub const CTRL_LOGOFF_EVENT: u32 = 5;
/// `CTRL_SHUTDOWN_EVENT`.
pub const CTRL_SHUTDOWN_EVENT: u32 = 6;

/// How long a console close may hold the process open for the restore pass.
pub const TEARDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns `true` for console events after which Windows terminates the
/// process as soon as the handler returns.
#[must_use]
pub const fn ends_process(ctrl_type: u32) -> bool {
    matches!(ctrl_type, CTRL_CLOSE_EVENT | CTRL_LOGOFF_EVENT | CTRL_SHUTDOWN_EVENT)
}

/// One-shot signal that the daemon has finished restoring windows.
///
/// The console control handler waits on it so the process is not torn down
/// mid-restore.
pub struct TeardownGate {
    done: Mutex<bool>,
    ready: Condvar,
}

impl TeardownGate {
    #[must_use]
    pub const fn new() -> Self { Self { done: Mutex::new(false), ready: Condvar::new() } }

    /// Marks teardown as finished and wakes every waiter.
    pub fn complete(&self) {
        *self.done.lock() = true;
        self.ready.notify_all();
    }

    #[must_use]
    pub fn is_complete(&self) -> bool { *self.done.lock() }

    /// Blocks until [`complete`](Self::complete) is called or `timeout`
    /// elapses. Returns `true` if teardown finished.
    #[allow(clippy::significant_drop_tightening)]
    pub fn wait(&self, timeout: Duration) -> bool {
        let mut done = self.done.lock();
        if !*done {
            let _ = self.ready.wait_while_for(&mut done, |done| !*done, timeout);
        }
        *done
    }
}

impl Default for TeardownGate {
    fn default() -> Self { Self::new() }
}

/// Completed by the daemon once every borderless window has been restored.
pub static TEARDOWN: TeardownGate = TeardownGate::new();

// ============================================================================
// Key Names
// ============================================================================

const VK_F1: u32 = 0x70;
const VK_F24: u32 = 0x87;

fn parse_modifier(part: &str) -> Option<u32> {
    match part.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(MOD_CONTROL),
        "alt" | "opt" | "option" => Some(MOD_ALT),
        "shift" => Some(MOD_SHIFT),
        "win" | "super" | "meta" | "cmd" | "command" => Some(MOD_WIN),
        _ => None,
    }
}

fn parse_key(part: &str) -> Option<u32> {
    let upper = part.to_ascii_uppercase();

    if let [c] = upper.as_bytes()
        && c.is_ascii_alphanumeric()
    {
        return Some(u32::from(*c));
    }

    if let Some(number) = upper.strip_prefix('F').and_then(|n| n.parse::<u32>().ok())
        && (1..=24).contains(&number)
    {
        return Some(VK_F1 + number - 1);
    }

    let code = match upper.as_str() {
        "ENTER" | "RETURN" => 0x0D,
        "SPACE" => 0x20,
        "ESC" | "ESCAPE" => 0x1B,
        "TAB" => 0x09,
        "BACKSPACE" => 0x08,
        "PAGEUP" => 0x21,
        "PAGEDOWN" => 0x22,
        "END" => 0x23,
        "HOME" => 0x24,
        "LEFT" => 0x25,
        "UP" => 0x26,
        "RIGHT" => 0x27,
        "DOWN" => 0x28,
        "INSERT" => 0x2D,
        "DELETE" => 0x2E,
        "PAUSE" => 0x13,
        "`" | "BACKQUOTE" => 0xC0,
        _ => return None,
    };
    Some(code)
}

fn key_name(key: u32) -> Option<String> {
    let name = match key {
        0x30..=0x39 | 0x41..=0x5A => return char::from_u32(key).map(String::from),
        VK_F1..=VK_F24 => return Some(format!("F{}", key - VK_F1 + 1)),
        0x0D => "Enter",
        0x20 => "Space",
        0x1B => "Esc",
        0x09 => "Tab",
        0x08 => "Backspace",
        0x21 => "PageUp",
        0x22 => "PageDown",
        0x23 => "End",
        0x24 => "Home",
        0x25 => "Left",
        0x26 => "Up",
        0x27 => "Right",
        0x28 => "Down",
        0x2D => "Insert",
        0x2E => "Delete",
        0x13 => "Pause",
        0xC0 => "Backquote",
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_parse_default_shortcuts() {
        let toggle: Shortcut = "Ctrl+Alt+Enter".parse().unwrap();
        assert_eq!(toggle, Shortcut::new(MOD_CONTROL | MOD_ALT, 0x0D));

        let quit: Shortcut = "Ctrl+Alt+Shift+Q".parse().unwrap();
        assert_eq!(quit, Shortcut::new(MOD_CONTROL | MOD_ALT | MOD_SHIFT, u32::from(b'Q')));
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!(
            "control+option+return".parse::<Shortcut>().unwrap(),
            "Ctrl+Alt+Enter".parse::<Shortcut>().unwrap()
        );
        assert_eq!("Super+f".parse::<Shortcut>().unwrap(), Shortcut::new(MOD_WIN, u32::from(b'F')));
        assert_eq!("Win + `".parse::<Shortcut>().unwrap(), Shortcut::new(MOD_WIN, 0xC0));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!("F11".parse::<Shortcut>().unwrap(), Shortcut::new(0, 0x7A));
        assert_eq!("Shift+F24".parse::<Shortcut>().unwrap(), Shortcut::new(MOD_SHIFT, 0x87));
        assert_eq!(
            "Ctrl+F25".parse::<Shortcut>(),
            Err(ShortcutError::UnknownKey("F25".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Shortcut>(), Err(ShortcutError::Empty));
        assert_eq!(
            "Ctrl+Alt".parse::<Shortcut>(),
            Err(ShortcutError::MissingKey("Ctrl+Alt".to_string()))
        );
        assert_eq!(
            "Ctrl+A+B".parse::<Shortcut>(),
            Err(ShortcutError::MultipleKeys("Ctrl+A+B".to_string()))
        );
        assert_eq!(
            "Hyper+A".parse::<Shortcut>(),
            Err(ShortcutError::UnknownKey("Hyper".to_string()))
        );
        assert_eq!("Q".parse::<Shortcut>(), Err(ShortcutError::MissingModifier("Q".to_string())));
    }

    #[test]
    fn test_display_is_canonical() {
        let shortcut: Shortcut = "shift+alt+ctrl+pageup".parse().unwrap();
        assert_eq!(shortcut.to_string(), "Ctrl+Alt+Shift+PageUp");
        assert_eq!("Win+F7".parse::<Shortcut>().unwrap().to_string(), "Win+F7");
        assert_eq!("Ctrl+5".parse::<Shortcut>().unwrap().to_string(), "Ctrl+5");
    }

    #[test]
    fn test_only_session_ending_events_end_the_process() {
        assert!(ends_process(CTRL_CLOSE_EVENT));
        assert!(ends_process(CTRL_LOGOFF_EVENT));
        assert!(ends_process(CTRL_SHUTDOWN_EVENT));
        // Ctrl+C and Ctrl+Break
        assert!(!ends_process(0));
        assert!(!ends_process(1));
    }

    #[test]
    fn test_teardown_wait_times_out_until_completed() {
        let gate = TeardownGate::new();
        assert!(!gate.wait(Duration::from_millis(20)));
        assert!(!gate.is_complete());

        gate.complete();
        assert!(gate.wait(Duration::from_millis(20)));
    }

    #[test]
    fn test_teardown_wait_wakes_on_completion() {
        let gate = Arc::new(TeardownGate::new());
        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.wait(Duration::from_secs(30)))
        };

        thread::sleep(Duration::from_millis(20));
        let started = Instant::now();
        gate.complete();

        assert!(waiter.join().unwrap());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_bindings_skip_invalid_and_disabled() {
        let config = HotkeysConfig { toggle: "Ctrl+Nope".to_string(), quit: "Ctrl+Q".to_string() };
        let bindings = bindings_from_config(&config);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].action, HotkeyAction::Quit);
        assert_eq!(bindings[0].id, 1);

        let bindings = bindings_from_config(&HotkeysConfig::default());
        assert_eq!(
            bindings.iter().map(|b| (b.id, b.action)).collect::<Vec<_>>(),
            vec![(1, HotkeyAction::Toggle), (2, HotkeyAction::Quit)]
        );
    }
}
