//! In-memory window manager.
//!
//! Models the parts of the desktop the engine touches: top-level windows with
//! style bitmasks, normal placement and minimize/maximize state, a Z-order, a
//! foreground window, processes and monitors. Individual operations can be
//! made to fail per window to exercise rollback paths.

use std::collections::{BTreeMap, HashMap, HashSet};

use parking_lot::Mutex;

use super::WindowPlatform;
use crate::borderless::error::{ERROR_ACCESS_DENIED, ERROR_INVALID_WINDOW_HANDLE};
use crate::borderless::geometry::select_monitor;
use crate::borderless::{ExtendedStyle, MonitorInfo, PlatformError, Rect, WindowHandle, WindowStyle};

/// Bounds Windows reports for a minimized top-level window.
pub const MINIMIZED_BOUNDS: Rect = Rect::new(-32000, -32000, 160, 28);

/// Overlapped window that is visible and clips its siblings.
const DEFAULT_STYLE: u32 = 0x14CF_0000;
/// `WS_EX_WINDOWEDGE | WS_EX_CLIENTEDGE`.
const DEFAULT_EXTENDED_STYLE: u32 = 0x0000_0300;

/// A mutating window-manager call, used for failure injection and call logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SetStyles,
    SetBounds,
    Maximize,
    Minimize,
    Restore,
}

impl Operation {
    const fn name(self) -> &'static str {
        match self {
            Self::SetStyles => "SetWindowLongPtrW",
            Self::SetBounds => "SetWindowPos",
            Self::Maximize | Self::Minimize | Self::Restore => "ShowWindow",
        }
    }
}

/// A fake top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryWindow {
    pub pid: u32,
    pub title: String,
    pub visible: bool,
    pub style: WindowStyle,
    pub extended_style: ExtendedStyle,
    /// Current bounds when not minimized.
    pub bounds: Rect,
    /// Bounds of the normal (restored) placement.
    pub normal_bounds: Rect,
    pub maximized: bool,
    pub minimized: bool,
}

impl MemoryWindow {
    /// A visible, titled, normal window with an overlapped style.
    #[must_use]
    pub fn new(pid: u32, bounds: Rect) -> Self {
        Self {
            pid,
            title: format!("window of {pid}"),
            visible: true,
            style: WindowStyle::from_bits(DEFAULT_STYLE),
            extended_style: ExtendedStyle::from_bits(DEFAULT_EXTENDED_STYLE),
            bounds,
            normal_bounds: bounds,
            maximized: false,
            minimized: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn with_styles(mut self, style: WindowStyle, extended_style: ExtendedStyle) -> Self {
        self.style = style;
        self.extended_style = extended_style;
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub const fn minimized(mut self) -> Self {
        self.minimized = true;
        self
    }

    fn is_candidate(&self) -> bool { self.visible && !self.title.is_empty() }
}

#[derive(Debug, Default)]
struct DesktopState {
    windows: BTreeMap<WindowHandle, MemoryWindow>,
    /// Top of the Z-order first.
    z_order: Vec<WindowHandle>,
    foreground: Option<WindowHandle>,
    monitors: Vec<MonitorInfo>,
    processes: HashMap<u32, String>,
    failures: HashSet<(WindowHandle, Operation)>,
    calls: Vec<(Operation, WindowHandle)>,
    next_handle: isize,
}

impl DesktopState {
    fn window_mut(
        &mut self,
        handle: WindowHandle,
        operation: Operation,
    ) -> Result<&mut MemoryWindow, PlatformError> {
        self.calls.push((operation, handle));

        if !self.windows.contains_key(&handle) {
            return Err(PlatformError::new(operation.name(), ERROR_INVALID_WINDOW_HANDLE));
        }
        if self.failures.contains(&(handle, operation)) {
            return Err(PlatformError::new(operation.name(), ERROR_ACCESS_DENIED));
        }

        self.windows
            .get_mut(&handle)
            .ok_or_else(|| PlatformError::new(operation.name(), ERROR_INVALID_WINDOW_HANDLE))
    }

    fn maximized_area(&self, normal: Rect) -> Rect {
        select_monitor(normal, &self.monitors)
            .or_else(|| self.monitors.first())
            .map_or(normal, |monitor| monitor.work_area)
    }
}

/// An in-memory [`WindowPlatform`].
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    state: Mutex<DesktopState>,
}

impl MemoryPlatform {
    /// Creates a desktop with the given monitors and no windows.
    #[must_use]
    pub fn with_monitors(monitors: Vec<MonitorInfo>) -> Self {
        let platform = Self::default();
        {
            let mut state = platform.state.lock();
            state.monitors = monitors;
            state.next_handle = 0x10010;
        }
        platform
    }

    /// Two side-by-side 1920x1080 monitors with a 40px taskbar each.
    #[must_use]
    pub fn dual_monitor() -> Self {
        Self::with_monitors(vec![
            MonitorInfo::new(0, r"\\.\DISPLAY1", Rect::new(0, 0, 1920, 1080))
                .with_work_area(Rect::new(0, 0, 1920, 1040)),
            MonitorInfo::new(1, r"\\.\DISPLAY2", Rect::new(1920, 0, 1920, 1080))
                .with_work_area(Rect::new(1920, 0, 1920, 1040)),
        ])
    }

    /// Opens a window on top of the Z-order and returns its handle.
    ///
    /// A maximized window can be created by calling [`WindowPlatform::maximize`]
    /// afterwards.
    pub fn open(&self, window: MemoryWindow) -> WindowHandle {
        let mut state = self.state.lock();
        state.next_handle += 0x10;
        let handle = WindowHandle::from_raw(state.next_handle);

        state.processes.entry(window.pid).or_insert_with(|| format!("app{}.exe", window.pid));
        state.windows.insert(handle, window);
        state.z_order.insert(0, handle);
        handle
    }

    /// Destroys a window, as if its owner closed it.
    pub fn close(&self, handle: WindowHandle) {
        let mut state = self.state.lock();
        state.windows.remove(&handle);
        state.z_order.retain(|&h| h != handle);
        if state.foreground == Some(handle) {
            state.foreground = None;
        }
    }

    /// Brings a window to the top of the Z-order and gives it focus.
    pub fn focus(&self, handle: WindowHandle) {
        let mut state = self.state.lock();
        if state.windows.contains_key(&handle) {
            state.z_order.retain(|&h| h != handle);
            state.z_order.insert(0, handle);
            state.foreground = Some(handle);
        }
    }

    /// Terminates a process and closes all of its windows.
    pub fn kill(&self, pid: u32) {
        let handles: Vec<_> = {
            let mut state = self.state.lock();
            state.processes.remove(&pid);
            state.windows.iter().filter(|(_, w)| w.pid == pid).map(|(&h, _)| h).collect()
        };
        for handle in handles {
            self.close(handle);
        }
    }

    /// Sets the executable name reported for a process.
    pub fn set_process_name(&self, pid: u32, name: impl Into<String>) {
        self.state.lock().processes.insert(pid, name.into());
    }

    /// Replaces the monitor layout, e.g. to simulate a disconnected display.
    pub fn set_monitors(&self, monitors: Vec<MonitorInfo>) { self.state.lock().monitors = monitors; }

    /// Makes `operation` on `handle` fail with access denied.
    pub fn fail(&self, handle: WindowHandle, operation: Operation) {
        self.state.lock().failures.insert((handle, operation));
    }

    /// Removes all injected failures.
    pub fn clear_failures(&self) { self.state.lock().failures.clear(); }

    /// Returns a copy of the window's current state.
    #[must_use]
    pub fn window(&self, handle: WindowHandle) -> Option<MemoryWindow> {
        self.state.lock().windows.get(&handle).cloned()
    }

    /// Mutating calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(Operation, WindowHandle)> { self.state.lock().calls.clone() }
}

impl WindowPlatform for MemoryPlatform {
    fn is_window(&self, handle: WindowHandle) -> bool {
        self.state.lock().windows.contains_key(&handle)
    }

    fn foreground_window(&self) -> Option<WindowHandle> { self.state.lock().foreground }

    fn is_candidate(&self, handle: WindowHandle) -> bool {
        self.state.lock().windows.get(&handle).is_some_and(MemoryWindow::is_candidate)
    }

    fn top_level_windows(&self, pid: u32) -> Result<Vec<WindowHandle>, PlatformError> {
        let state = self.state.lock();
        Ok(state
            .z_order
            .iter()
            .copied()
            .filter(|h| state.windows.get(h).is_some_and(|w| w.pid == pid && w.is_candidate()))
            .collect())
    }

    fn process_id(&self, handle: WindowHandle) -> Option<u32> {
        self.state.lock().windows.get(&handle).map(|w| w.pid)
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.state.lock().processes.get(&pid).cloned()
    }

    fn styles(&self, handle: WindowHandle) -> Result<(WindowStyle, ExtendedStyle), PlatformError> {
        self.state
            .lock()
            .windows
            .get(&handle)
            .map(|w| (w.style, w.extended_style))
            .ok_or_else(|| PlatformError::new("GetWindowLongPtrW", ERROR_INVALID_WINDOW_HANDLE))
    }

    fn set_styles(
        &self,
        handle: WindowHandle,
        style: WindowStyle,
        extended_style: ExtendedStyle,
    ) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        let window = state.window_mut(handle, Operation::SetStyles)?;
        window.style = style;
        window.extended_style = extended_style;
        Ok(())
    }

    fn bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        self.state
            .lock()
            .windows
            .get(&handle)
            .map(|w| if w.minimized { MINIMIZED_BOUNDS } else { w.bounds })
            .ok_or_else(|| PlatformError::new("GetWindowRect", ERROR_INVALID_WINDOW_HANDLE))
    }

    fn restored_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        self.state
            .lock()
            .windows
            .get(&handle)
            .map(|w| w.normal_bounds)
            .ok_or_else(|| PlatformError::new("GetWindowPlacement", ERROR_INVALID_WINDOW_HANDLE))
    }

    fn set_bounds(&self, handle: WindowHandle, bounds: Rect) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        let window = state.window_mut(handle, Operation::SetBounds)?;
        window.bounds = bounds;
        if !window.maximized {
            window.normal_bounds = bounds;
        }
        Ok(())
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        self.state.lock().windows.get(&handle).is_some_and(|w| w.maximized && !w.minimized)
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        self.state.lock().windows.get(&handle).is_some_and(|w| w.minimized)
    }

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        let normal = state.window_mut(handle, Operation::Maximize)?.normal_bounds;
        let area = state.maximized_area(normal);

        if let Some(window) = state.windows.get_mut(&handle) {
            window.minimized = false;
            window.maximized = true;
            window.style = window.style.with_maximized(true);
            window.bounds = area;
        }
        Ok(())
    }

    fn minimize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        self.state.lock().window_mut(handle, Operation::Minimize)?.minimized = true;
        Ok(())
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        let window = state.window_mut(handle, Operation::Restore)?;

        if window.minimized {
            window.minimized = false;
        } else if window.maximized {
            window.maximized = false;
            window.style = window.style.with_maximized(false);
            window.bounds = window.normal_bounds;
        }
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError> {
        Ok(self.state.lock().monitors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_puts_window_on_top() {
        let platform = MemoryPlatform::dual_monitor();
        let first = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));
        let second = platform.open(MemoryWindow::new(10, Rect::new(50, 50, 800, 600)));

        assert_eq!(platform.top_level_windows(10).unwrap(), vec![second, first]);
        platform.focus(first);
        assert_eq!(platform.top_level_windows(10).unwrap(), vec![first, second]);
        assert_eq!(platform.foreground_window(), Some(first));
    }

    #[test]
    fn test_hidden_and_untitled_windows_are_not_candidates() {
        let platform = MemoryPlatform::dual_monitor();
        platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)).hidden());
        platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)).with_title(""));

        assert!(platform.top_level_windows(10).unwrap().is_empty());
    }

    #[test]
    fn test_maximize_and_restore() {
        let platform = MemoryPlatform::dual_monitor();
        let normal = Rect::new(2000, 100, 800, 600);
        let handle = platform.open(MemoryWindow::new(10, normal));

        platform.maximize(handle).unwrap();
        assert!(platform.is_maximized(handle));
        assert_eq!(platform.bounds(handle).unwrap(), Rect::new(1920, 0, 1920, 1040));
        assert!(platform.styles(handle).unwrap().0.is_maximized());
        assert_eq!(platform.restored_bounds(handle).unwrap(), normal);

        platform.restore(handle).unwrap();
        assert!(!platform.is_maximized(handle));
        assert_eq!(platform.bounds(handle).unwrap(), normal);
        assert!(!platform.styles(handle).unwrap().0.is_maximized());
    }

    #[test]
    fn test_minimized_window_reports_offscreen_bounds() {
        let platform = MemoryPlatform::dual_monitor();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)).minimized());

        assert_eq!(platform.bounds(handle).unwrap(), MINIMIZED_BOUNDS);
        assert!(platform.is_minimized(handle));

        platform.restore(handle).unwrap();
        assert_eq!(platform.bounds(handle).unwrap(), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn test_focused_window_candidacy() {
        let platform = MemoryPlatform::dual_monitor();
        let normal = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));
        let hidden = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)).hidden());
        let untitled = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)).with_title(""));

        assert!(platform.is_candidate(normal));
        assert!(!platform.is_candidate(hidden));
        assert!(!platform.is_candidate(untitled));

        platform.close(normal);
        assert!(!platform.is_candidate(normal));
    }

    #[test]
    fn test_minimize_is_logged_and_can_fail() {
        let platform = MemoryPlatform::dual_monitor();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));

        platform.minimize(handle).unwrap();
        assert!(platform.is_minimized(handle));
        assert_eq!(platform.calls(), vec![(Operation::Minimize, handle)]);

        platform.restore(handle).unwrap();
        platform.fail(handle, Operation::Minimize);
        assert!(platform.minimize(handle).unwrap_err().is_access_denied());
        assert!(!platform.is_minimized(handle));
    }

    #[test]
    fn test_injected_failure() {
        let platform = MemoryPlatform::dual_monitor();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));
        platform.fail(handle, Operation::SetBounds);

        let err = platform.set_bounds(handle, Rect::new(0, 0, 10, 10)).unwrap_err();
        assert!(err.is_access_denied());
        assert_eq!(err.operation, "SetWindowPos");

        platform.clear_failures();
        assert!(platform.set_bounds(handle, Rect::new(0, 0, 10, 10)).is_ok());
    }

    #[test]
    fn test_closed_window_is_invalid() {
        let platform = MemoryPlatform::dual_monitor();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));
        platform.close(handle);

        assert!(!platform.is_window(handle));
        let err = platform.set_styles(handle, WindowStyle::default(), ExtendedStyle::default());
        assert_eq!(err.unwrap_err().code, ERROR_INVALID_WINDOW_HANDLE);
    }

    #[test]
    fn test_kill_removes_process_and_windows() {
        let platform = MemoryPlatform::dual_monitor();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(0, 0, 800, 600)));
        assert_eq!(platform.process_name(10).as_deref(), Some("app10.exe"));

        platform.kill(10);
        assert_eq!(platform.process_name(10), None);
        assert!(!platform.is_window(handle));
    }
}
