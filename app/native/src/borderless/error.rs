//! Error types for the borderless transformation engine.
//!
//! # Error Categories
//!
//! - **Resolution errors**: no window matches the selector, or several do
//! - **Geometry errors**: the window is not on any monitor, monitor index invalid
//! - **Store contract errors**: snapshot already captured / not captured
//! - **Platform errors**: the window manager rejected a style or bounds write
//!
//! Store contract errors never escape the engine: entering an already
//! borderless window or exiting a normal one is reported as a no-op
//! [`Transition`](super::Transition) instead.

use thiserror::Error;

use super::types::{Selector, WindowHandle};

/// Result type alias for borderless operations.
pub type BorderlessResult<T> = Result<T, BorderlessError>;

/// Win32 `ERROR_ACCESS_DENIED`, returned for windows of elevated processes.
pub const ERROR_ACCESS_DENIED: u32 = 5;

/// Win32 `ERROR_INVALID_WINDOW_HANDLE`.
pub const ERROR_INVALID_WINDOW_HANDLE: u32 = 1400;

/// A single window-manager call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation} failed (os error {code})")]
pub struct PlatformError {
    /// Name of the platform call (e.g. `SetWindowPos`).
    pub operation: &'static str,
    /// OS error code reported for the failure.
    pub code: u32,
}

impl PlatformError {
    /// Creates a platform error for the given call and OS error code.
    #[must_use]
    pub const fn new(operation: &'static str, code: u32) -> Self { Self { operation, code } }

    /// Returns `true` if the OS refused the call for lack of rights.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool { self.code == ERROR_ACCESS_DENIED }
}

/// Errors that can occur while resolving, transforming or restoring a window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorderlessError {
    /// No window satisfies the selector.
    #[error("no window matches {0}")]
    NoMatchingWindow(Selector),

    /// A process owns several top-level windows and the policy requires one.
    #[error("process {pid} owns {count} top-level windows")]
    AmbiguousMatch {
        /// The process that was targeted.
        pid: u32,
        /// Number of candidate windows found.
        count: usize,
    },

    /// The window has no on-screen area (minimized or off-screen).
    #[error("window {0} is not visible on any monitor")]
    WindowNotVisible(WindowHandle),

    /// A monitor index was requested that does not exist.
    #[error("monitor {0} not found")]
    MonitorNotFound(usize),

    /// The platform reported no monitors at all.
    #[error("no monitors detected")]
    NoMonitors,

    /// The handle no longer refers to a live window.
    #[error("window {0} no longer exists")]
    InvalidHandle(WindowHandle),

    /// A snapshot already exists for the handle.
    #[error("window {0} is already captured")]
    AlreadyCaptured(WindowHandle),

    /// No snapshot exists for the handle.
    #[error("window {0} is not captured")]
    NotCaptured(WindowHandle),

    /// Writing the borderless style flags failed.
    #[error("failed to apply borderless style to window {handle}: {source}")]
    StyleApplyFailed {
        /// The window being transformed.
        handle: WindowHandle,
        /// The failing platform call.
        #[source]
        source: PlatformError,
    },

    /// Writing the fullscreen bounds failed.
    #[error("failed to apply fullscreen bounds to window {handle}: {source}")]
    BoundsApplyFailed {
        /// The window being transformed.
        handle: WindowHandle,
        /// The failing platform call.
        #[source]
        source: PlatformError,
    },

    /// Writing the original style or bounds back failed.
    #[error("failed to restore window {handle}: {source}")]
    RestoreFailed {
        /// The window being restored.
        handle: WindowHandle,
        /// The failing platform call.
        #[source]
        source: PlatformError,
    },

    /// Reading window state from the platform failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl BorderlessError {
    /// Creates a style apply error.
    #[must_use]
    pub const fn style_apply(handle: WindowHandle, source: PlatformError) -> Self {
        Self::StyleApplyFailed { handle, source }
    }

    /// Creates a bounds apply error.
    #[must_use]
    pub const fn bounds_apply(handle: WindowHandle, source: PlatformError) -> Self {
        Self::BoundsApplyFailed { handle, source }
    }

    /// Creates a restore error.
    #[must_use]
    pub const fn restore(handle: WindowHandle, source: PlatformError) -> Self {
        Self::RestoreFailed { handle, source }
    }

    /// Returns `true` if this error indicates a window or monitor was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingWindow(_)
                | Self::MonitorNotFound(_)
                | Self::NoMonitors
                | Self::InvalidHandle(_)
        )
    }

    /// Returns `true` if a window-manager call failed.
    #[must_use]
    pub const fn is_platform_failure(&self) -> bool {
        matches!(
            self,
            Self::StyleApplyFailed { .. }
                | Self::BoundsApplyFailed { .. }
                | Self::RestoreFailed { .. }
                | Self::Platform(_)
        )
    }

    /// Returns the underlying platform error, if any.
    #[must_use]
    pub const fn platform_error(&self) -> Option<&PlatformError> {
        match self {
            Self::StyleApplyFailed { source, .. }
            | Self::BoundsApplyFailed { source, .. }
            | Self::RestoreFailed { source, .. }
            | Self::Platform(source) => Some(source),
            _ => None,
        }
    }
}

/// An engine error tagged with the selector that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{selector}: {source}")]
pub struct ToggleError {
    /// The selector the caller asked for.
    pub selector: Selector,
    /// The untranslated engine error.
    #[source]
    pub source: BorderlessError,
}

impl ToggleError {
    /// Tags an engine error with its selector.
    #[must_use]
    pub const fn new(selector: Selector, source: BorderlessError) -> Self {
        Self { selector, source }
    }
}
