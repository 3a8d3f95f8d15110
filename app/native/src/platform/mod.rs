//! Platform abstractions for `NoBorders`.
//!
//! Every call the engine makes into the OS window manager goes through the
//! [`WindowPlatform`] trait:
//!
//! - [`win32`] - the native backend, built on the `windows` crate
//! - [`memory`] - an in-memory window manager for tests and non-Windows hosts
//! - [`process`] - executable names of running processes via `sysinfo`
//! - [`thread`] - named background threads

pub mod memory;
pub mod process;
pub mod thread;
#[cfg(windows)]
pub mod win32;

pub use memory::{MemoryPlatform, MemoryWindow, Operation};
pub use thread::spawn_named_thread;
#[cfg(windows)]
pub use win32::Win32Platform;

use crate::borderless::{ExtendedStyle, MonitorInfo, PlatformError, Rect, WindowHandle, WindowStyle};

/// Outbound interface to the OS window manager.
///
/// Implementations must be callable from the hotkey thread and the watcher
/// thread; the engine serializes all mutations behind its own lock.
pub trait WindowPlatform: Send + Sync {
    /// Returns `true` if the handle still refers to a live window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// The window that currently has input focus, if any.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Returns `true` for a window the user would call an application
    /// window: visible, unowned, not a tool window, and titled.
    fn is_candidate(&self, handle: WindowHandle) -> bool;

    /// Candidate top-level windows owned by `pid`, top of the Z-order first.
    ///
    /// Candidates are visible, unowned, non-tool windows with a title.
    ///
    /// # Errors
    ///
    /// Returns an error if window enumeration fails.
    fn top_level_windows(&self, pid: u32) -> Result<Vec<WindowHandle>, PlatformError>;

    /// The process that owns the window.
    fn process_id(&self, handle: WindowHandle) -> Option<u32>;

    /// Executable name of a running process, `None` if it has exited.
    fn process_name(&self, pid: u32) -> Option<String>;

    /// Reads the style and extended style bitmasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be queried.
    fn styles(&self, handle: WindowHandle) -> Result<(WindowStyle, ExtendedStyle), PlatformError>;

    /// Writes the style and extended style bitmasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects either write.
    fn set_styles(
        &self,
        handle: WindowHandle,
        style: WindowStyle,
        extended_style: ExtendedStyle,
    ) -> Result<(), PlatformError>;

    /// Current on-screen bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be queried.
    fn bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError>;

    /// Bounds the window occupies in its normal (restored) placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be queried.
    fn restored_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError>;

    /// Moves and resizes the window, applying any pending frame change.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the move.
    fn set_bounds(&self, handle: WindowHandle, bounds: Rect) -> Result<(), PlatformError>;

    fn is_maximized(&self, handle: WindowHandle) -> bool;

    fn is_minimized(&self, handle: WindowHandle) -> bool;

    /// Maximizes the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the request.
    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    /// Minimizes the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the request.
    fn minimize(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    /// Restores a minimized or maximized window to its normal placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the request.
    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError>;

    /// All connected monitors, primary first.
    ///
    /// # Errors
    ///
    /// Returns an error if monitor enumeration fails.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError>;
}
