//! Core data types for the borderless transformation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::style::{ExtendedStyle, WindowStyle};

// ============================================================================
// Window Handle
// ============================================================================

/// Opaque identifier for a top-level window.
///
/// This is a weak, non-owning reference: the window it names is owned by
/// another process and may be destroyed at any time. It is only ever used as
/// a key; every mutation re-checks validity with the platform first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// Wraps a raw platform handle value.
    #[must_use]
    pub const fn from_raw(raw: isize) -> Self { Self(raw) }

    /// Returns the raw platform handle value.
    #[must_use]
    pub const fn raw(self) -> isize { self.0 }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#010X}", self.0) }
}

// ============================================================================
// Selector
// ============================================================================

/// Which window a toggle request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "pid")]
pub enum Selector {
    /// The window currently holding input focus.
    ActiveWindow,
    /// The top-level window owned by the given process.
    ByProcessId(u32),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveWindow => write!(f, "the active window"),
            Self::ByProcessId(pid) => write!(f, "process {pid}"),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A rectangle in virtual-desktop pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from its left/top/right/bottom edges.
    ///
    /// Extents that do not fit in an `i32` saturate.
    #[must_use]
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }

    /// X coordinate one past the right edge, saturating.
    #[must_use]
    pub const fn right(&self) -> i32 { self.x.saturating_add(self.width) }

    /// Y coordinate one past the bottom edge, saturating.
    #[must_use]
    pub const fn bottom(&self) -> i32 { self.y.saturating_add(self.height) }

    /// Returns `true` if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.width <= 0 || self.height <= 0 }

    /// Area of the overlap between two rectangles, zero if they are disjoint.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> i64 {
        let width = i64::from(self.right().min(other.right())) - i64::from(self.x.max(other.x));
        let height =
            i64::from(self.bottom().min(other.bottom())) - i64::from(self.y.max(other.y));

        if width <= 0 || height <= 0 { 0 } else { width.saturating_mul(height) }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

/// A physical display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    /// Position in the monitor list (primary first).
    pub index: usize,
    /// Device name reported by the OS (e.g. `\\.\DISPLAY1`).
    pub name: String,
    /// The entire pixel rectangle of the monitor.
    pub full_area: Rect,
    /// The usable area, excluding taskbar and docked bars.
    pub work_area: Rect,
    /// Whether this is the primary monitor.
    pub is_primary: bool,
}

impl MonitorInfo {
    /// Creates a monitor whose work area equals its full area.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, full_area: Rect) -> Self {
        Self {
            index,
            name: name.into(),
            full_area,
            work_area: full_area,
            is_primary: index == 0,
        }
    }

    /// Sets the work area.
    #[must_use]
    pub const fn with_work_area(mut self, work_area: Rect) -> Self {
        self.work_area = work_area;
        self
    }

    /// Returns the device name without the `\\.\` prefix.
    #[must_use]
    pub fn friendly_name(&self) -> &str { self.name.trim_start_matches(r"\\.\") }
}

// ============================================================================
// Snapshot and State
// ============================================================================

/// The original presentation of a window, recorded on entering borderless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStyleSnapshot {
    /// The window this snapshot belongs to.
    pub handle: WindowHandle,
    /// Style flags in the normal (un-maximized) state.
    pub style: WindowStyle,
    /// Extended style flags.
    pub extended_style: ExtendedStyle,
    /// Bounds in the normal (un-maximized) state.
    pub bounds: Rect,
    /// Whether the window was maximized before the transformation.
    pub was_maximized: bool,
}

/// Presentation state of a window, derived from the state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleState {
    /// Original windowed presentation.
    Normal,
    /// Chrome stripped and sized to a full monitor.
    Borderless,
}

/// The effect of a transformation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    /// The window went from normal to borderless.
    Entered,
    /// The window went from borderless back to normal.
    Exited,
    /// The window was already borderless; nothing changed.
    AlreadyBorderless,
    /// The window was already normal; nothing changed.
    AlreadyNormal,
    /// The window was gone; its snapshot was dropped.
    Discarded,
}

impl Transition {
    /// Returns `true` if the window was actually changed.
    #[must_use]
    pub const fn is_change(self) -> bool { matches!(self, Self::Entered | Self::Exited) }

    /// Returns the state the window is in after this transition.
    #[must_use]
    pub const fn resulting_state(self) -> ToggleState {
        match self {
            Self::Entered | Self::AlreadyBorderless => ToggleState::Borderless,
            Self::Exited | Self::AlreadyNormal | Self::Discarded => ToggleState::Normal,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Entered => "made borderless fullscreen",
            Self::Exited => "reverted to windowed",
            Self::AlreadyBorderless => "already borderless",
            Self::AlreadyNormal => "already windowed",
            Self::Discarded => "window closed, state discarded",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display_is_hex() {
        assert_eq!(WindowHandle::from_raw(0xABC).to_string(), "0x00000ABC");
    }

    #[test]
    fn test_intersection_area() {
        let monitor = Rect::new(0, 0, 1920, 1080);
        assert_eq!(monitor.intersection_area(&Rect::new(1800, 0, 200, 200)), 120 * 200);
        assert_eq!(monitor.intersection_area(&Rect::new(1920, 0, 100, 100)), 0);
        assert_eq!(monitor.intersection_area(&Rect::new(-50, -50, 100, 100)), 50 * 50);
        assert_eq!(monitor.intersection_area(&Rect::new(-32000, -32000, 160, 28)), 0);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_edges(-10, 20, 90, 220);
        assert_eq!(rect, Rect::new(-10, 20, 100, 200));
        assert_eq!(rect.right(), 90);
        assert_eq!(rect.bottom(), 220);
        assert!(!rect.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn test_rect_extreme_coordinates_saturate() {
        let rect = Rect::from_edges(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(rect.width, i32::MAX);
        assert_eq!(rect.height, i32::MAX);
        assert_eq!(rect.right(), -1);

        let far = Rect::new(i32::MAX - 10, i32::MAX - 10, 100, 100);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MAX);
        assert_eq!(far.intersection_area(&Rect::new(0, 0, 1920, 1080)), 0);
        assert_eq!(far.intersection_area(&far), 10 * 10);

        let full = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let side = i64::from(i32::MAX);
        assert_eq!(full.intersection_area(&full), side * side);
    }

    #[test]
    fn test_friendly_monitor_name() {
        let monitor = MonitorInfo::new(0, r"\\.\DISPLAY1", Rect::new(0, 0, 1920, 1080));
        assert_eq!(monitor.friendly_name(), "DISPLAY1");
        assert!(monitor.is_primary);
    }

    #[test]
    fn test_transition_resulting_state() {
        assert_eq!(Transition::Entered.resulting_state(), ToggleState::Borderless);
        assert_eq!(Transition::AlreadyBorderless.resulting_state(), ToggleState::Borderless);
        assert_eq!(Transition::Discarded.resulting_state(), ToggleState::Normal);
        assert!(Transition::Exited.is_change());
        assert!(!Transition::AlreadyNormal.is_change());
    }

    #[test]
    fn test_selector_serializes_tagged() {
        let json = serde_json::to_string(&Selector::ByProcessId(12)).unwrap();
        assert_eq!(json, r#"{"type":"byProcessId","pid":12}"#);
    }
}
