//! Typed window style bitmasks.
//!
//! The OS stores window styles as two opaque bitmasks. These wrappers give
//! names to the chrome bits the engine manipulates and leave every other bit
//! untouched, so layered, transparent or topmost windows keep their behavior
//! after being made borderless.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Style Bits
// ============================================================================

/// Thin-line border.
pub const WS_BORDER: u32 = 0x0080_0000;
/// Dialog-box frame (no title bar on its own).
pub const WS_DLGFRAME: u32 = 0x0040_0000;
/// Title bar (`WS_BORDER | WS_DLGFRAME`).
pub const WS_CAPTION: u32 = WS_BORDER | WS_DLGFRAME;
/// Sizing border.
pub const WS_THICKFRAME: u32 = 0x0004_0000;
/// Window menu on the title bar.
pub const WS_SYSMENU: u32 = 0x0008_0000;
/// Minimize button.
pub const WS_MINIMIZEBOX: u32 = 0x0002_0000;
/// Maximize button.
pub const WS_MAXIMIZEBOX: u32 = 0x0001_0000;
/// Window is maximized.
pub const WS_MAXIMIZE: u32 = 0x0100_0000;

/// Double border for dialog boxes.
pub const WS_EX_DLGMODALFRAME: u32 = 0x0000_0001;
/// Sunken edge around the client area.
pub const WS_EX_CLIENTEDGE: u32 = 0x0000_0200;
/// Three-dimensional border for non-input windows.
pub const WS_EX_STATICEDGE: u32 = 0x0002_0000;

const CHROME: u32 =
    WS_CAPTION | WS_THICKFRAME | WS_SYSMENU | WS_MINIMIZEBOX | WS_MAXIMIZEBOX | WS_MAXIMIZE;

const EX_CHROME: u32 = WS_EX_DLGMODALFRAME | WS_EX_CLIENTEDGE | WS_EX_STATICEDGE;

// ============================================================================
// WindowStyle
// ============================================================================

/// The primary style bitmask of a window (`GWL_STYLE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowStyle(u32);

impl WindowStyle {
    /// Wraps a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self { Self(bits) }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 { self.0 }

    #[must_use]
    pub const fn has_caption(self) -> bool { self.0 & WS_CAPTION == WS_CAPTION }

    #[must_use]
    pub const fn is_resizable(self) -> bool { self.0 & WS_THICKFRAME != 0 }

    #[must_use]
    pub const fn has_system_menu(self) -> bool { self.0 & WS_SYSMENU != 0 }

    #[must_use]
    pub const fn has_minimize_box(self) -> bool { self.0 & WS_MINIMIZEBOX != 0 }

    #[must_use]
    pub const fn has_maximize_box(self) -> bool { self.0 & WS_MAXIMIZEBOX != 0 }

    /// Returns `true` if the maximize state bit is set.
    #[must_use]
    pub const fn is_maximized(self) -> bool { self.0 & WS_MAXIMIZE != 0 }

    /// Returns `true` if any chrome bit is present.
    #[must_use]
    pub const fn has_chrome(self) -> bool { self.0 & CHROME != 0 }

    /// Strips caption, frame, menu and min/max boxes and clears the maximize
    /// hint. All other bits are preserved.
    #[must_use]
    pub const fn without_chrome(self) -> Self { Self(self.0 & !CHROME) }

    /// Returns the style with the maximize state bit set or cleared.
    #[must_use]
    pub const fn with_maximized(self, maximized: bool) -> Self {
        if maximized { Self(self.0 | WS_MAXIMIZE) } else { Self(self.0 & !WS_MAXIMIZE) }
    }
}

impl fmt::Display for WindowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#010X}", self.0) }
}

// ============================================================================
// ExtendedStyle
// ============================================================================

/// The extended style bitmask of a window (`GWL_EXSTYLE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtendedStyle(u32);

impl ExtendedStyle {
    /// Wraps a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self { Self(bits) }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 { self.0 }

    #[must_use]
    pub const fn has_dialog_frame(self) -> bool { self.0 & WS_EX_DLGMODALFRAME != 0 }

    #[must_use]
    pub const fn has_client_edge(self) -> bool { self.0 & WS_EX_CLIENTEDGE != 0 }

    #[must_use]
    pub const fn has_static_edge(self) -> bool { self.0 & WS_EX_STATICEDGE != 0 }

    /// Strips the edge and dialog frame bits. All other bits are preserved.
    #[must_use]
    pub const fn without_chrome(self) -> Self { Self(self.0 & !EX_CHROME) }
}

impl fmt::Display for ExtendedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#010X}", self.0) }
}
