//! Native window platform built on the Win32 API.
//!
//! Style writes go through `SetWindowLongPtrW`, which signals failure only
//! through the thread's last-error value, so it is cleared before each write.

use std::ffi::c_void;

use windows::Win32::Foundation::{GetLastError, HWND, LPARAM, RECT, SetLastError, WIN32_ERROR};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetForegroundWindow, GetWindow,
    GetWindowLongPtrW, GetWindowPlacement, GetWindowRect, GetWindowTextLengthW,
    GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, IsZoomed, SW_MAXIMIZE,
    SW_MINIMIZE, SW_RESTORE, SWP_FRAMECHANGED, SWP_NOZORDER, SWP_SHOWWINDOW, SetWindowLongPtrW,
    SetWindowPos, ShowWindow, WINDOW_LONG_PTR_INDEX, WINDOWPLACEMENT, WS_EX_APPWINDOW,
    WS_EX_TOOLWINDOW,
};
use windows::core::BOOL;

use super::WindowPlatform;
use crate::borderless::error::ERROR_INVALID_WINDOW_HANDLE;
use crate::borderless::{
    ExtendedStyle, MonitorInfo, PlatformError, Rect, WindowHandle, WindowStyle,
};

const MONITORINFOF_PRIMARY: u32 = 0x0000_0001;

/// The Win32 window manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Platform;

impl Win32Platform {
    #[must_use]
    pub const fn new() -> Self { Self }
}

fn hwnd(handle: WindowHandle) -> HWND { HWND(handle.raw() as *mut c_void) }

fn handle_of(hwnd: HWND) -> WindowHandle { WindowHandle::from_raw(hwnd.0 as isize) }

fn rect_of(rect: &RECT) -> Rect { Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom) }

/// Builds an error from the calling thread's last-error value.
fn last_error(operation: &'static str) -> PlatformError {
    PlatformError::new(operation, unsafe { GetLastError() }.0)
}

/// Builds an error from a `windows` error, recovering the Win32 code.
#[allow(clippy::cast_sign_loss, clippy::needless_pass_by_value)]
fn win32_error(operation: &'static str, err: windows::core::Error) -> PlatformError {
    PlatformError::new(operation, (err.code().0 as u32) & 0xFFFF)
}

/// Reads a window long, treating zero with a last error as failure.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX) -> Result<u32, PlatformError> {
    unsafe { SetLastError(WIN32_ERROR(0)) };
    let value = unsafe { GetWindowLongPtrW(hwnd, index) };
    if value == 0 && unsafe { GetLastError() }.0 != 0 {
        return Err(last_error("GetWindowLongPtrW"));
    }
    Ok(value as u32)
}

#[allow(clippy::cast_possible_wrap)]
fn write_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX, value: u32) -> Result<(), PlatformError> {
    unsafe { SetLastError(WIN32_ERROR(0)) };
    let previous = unsafe { SetWindowLongPtrW(hwnd, index, value as isize) };
    if previous == 0 && unsafe { GetLastError() }.0 != 0 {
        return Err(last_error("SetWindowLongPtrW"));
    }
    Ok(())
}

/// Visible, unowned, titled, and not a tool window.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn is_app_window(hwnd: HWND) -> bool {
    unsafe {
        if !IsWindowVisible(hwnd).as_bool() {
            return false;
        }
        if GetWindow(hwnd, GW_OWNER).is_ok_and(|owner| !owner.is_invalid()) {
            return false;
        }
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
        if ex_style & WS_EX_TOOLWINDOW.0 != 0 && ex_style & WS_EX_APPWINDOW.0 == 0 {
            return false;
        }
        GetWindowTextLengthW(hwnd) > 0
    }
}

struct EnumContext {
    pid: u32,
    found: Vec<WindowHandle>,
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let context = unsafe { &mut *(lparam.0 as *mut EnumContext) };

    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&raw mut pid)) };

    if pid == context.pid && is_app_window(hwnd) {
        context.found.push(handle_of(hwnd));
    }
    BOOL::from(true)
}

unsafe extern "system" fn collect_monitor(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<(String, Rect, Rect, bool)>) };

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = u32::try_from(size_of::<MONITORINFOEXW>()).unwrap_or(u32::MAX);

    if unsafe { GetMonitorInfoW(monitor, (&raw mut info).cast()) }.as_bool() {
        let len = info.szDevice.iter().position(|&c| c == 0).unwrap_or(info.szDevice.len());
        let name = String::from_utf16_lossy(&info.szDevice[..len]);
        monitors.push((
            name,
            rect_of(&info.monitorInfo.rcMonitor),
            rect_of(&info.monitorInfo.rcWork),
            info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        ));
    } else {
        tracing::debug!(monitor = ?monitor.0, "skipping monitor without info");
    }
    BOOL::from(true)
}

impl WindowPlatform for Win32Platform {
    fn is_window(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindow(Some(hwnd(handle))) }.as_bool()
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| handle_of(hwnd))
    }

    fn is_candidate(&self, handle: WindowHandle) -> bool {
        self.is_window(handle) && is_app_window(hwnd(handle))
    }

    fn top_level_windows(&self, pid: u32) -> Result<Vec<WindowHandle>, PlatformError> {
        let mut context = EnumContext { pid, found: Vec::new() };
        unsafe { EnumWindows(Some(collect_window), LPARAM(&raw mut context as isize)) }
            .map_err(|err| win32_error("EnumWindows", err))?;
        Ok(context.found)
    }

    fn process_id(&self, handle: WindowHandle) -> Option<u32> {
        let mut pid = 0u32;
        let thread = unsafe { GetWindowThreadProcessId(hwnd(handle), Some(&raw mut pid)) };
        (thread != 0 && pid != 0).then_some(pid)
    }

    fn process_name(&self, pid: u32) -> Option<String> { super::process::process_name(pid) }

    fn styles(&self, handle: WindowHandle) -> Result<(WindowStyle, ExtendedStyle), PlatformError> {
        let hwnd = hwnd(handle);
        let style = read_long(hwnd, GWL_STYLE)?;
        let extended = read_long(hwnd, GWL_EXSTYLE)?;
        Ok((WindowStyle::from_bits(style), ExtendedStyle::from_bits(extended)))
    }

    fn set_styles(
        &self,
        handle: WindowHandle,
        style: WindowStyle,
        extended_style: ExtendedStyle,
    ) -> Result<(), PlatformError> {
        let hwnd = hwnd(handle);
        write_long(hwnd, GWL_STYLE, style.bits())?;
        write_long(hwnd, GWL_EXSTYLE, extended_style.bits())
    }

    fn bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(handle), &raw mut rect) }
            .map_err(|err| win32_error("GetWindowRect", err))?;
        Ok(rect_of(&rect))
    }

    fn restored_bounds(&self, handle: WindowHandle) -> Result<Rect, PlatformError> {
        let mut placement = WINDOWPLACEMENT {
            length: u32::try_from(size_of::<WINDOWPLACEMENT>()).unwrap_or(u32::MAX),
            ..Default::default()
        };
        unsafe { GetWindowPlacement(hwnd(handle), &raw mut placement) }
            .map_err(|err| win32_error("GetWindowPlacement", err))?;
        Ok(rect_of(&placement.rcNormalPosition))
    }

    fn set_bounds(&self, handle: WindowHandle, bounds: Rect) -> Result<(), PlatformError> {
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_FRAMECHANGED | SWP_NOZORDER | SWP_SHOWWINDOW,
            )
        }
        .map_err(|err| win32_error("SetWindowPos", err))
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        unsafe { IsZoomed(hwnd(handle)) }.as_bool()
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        unsafe { IsIconic(hwnd(handle)) }.as_bool()
    }

    fn maximize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        // ShowWindow reports the previous visibility, not success
        if !self.is_window(handle) {
            return Err(PlatformError::new("ShowWindow", ERROR_INVALID_WINDOW_HANDLE));
        }
        let _ = unsafe { ShowWindow(hwnd(handle), SW_MAXIMIZE) };
        Ok(())
    }

    fn minimize(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        if !self.is_window(handle) {
            return Err(PlatformError::new("ShowWindow", ERROR_INVALID_WINDOW_HANDLE));
        }
        let _ = unsafe { ShowWindow(hwnd(handle), SW_MINIMIZE) };
        Ok(())
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), PlatformError> {
        if !self.is_window(handle) {
            return Err(PlatformError::new("ShowWindow", ERROR_INVALID_WINDOW_HANDLE));
        }
        let _ = unsafe { ShowWindow(hwnd(handle), SW_RESTORE) };
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError> {
        let mut found: Vec<(String, Rect, Rect, bool)> = Vec::new();
        let ok = unsafe {
            EnumDisplayMonitors(None, None, Some(collect_monitor), LPARAM(&raw mut found as isize))
        };
        if !ok.as_bool() {
            return Err(last_error("EnumDisplayMonitors"));
        }

        // Primary first, the rest in enumeration order
        found.sort_by_key(|(_, _, _, primary)| !primary);

        Ok(found
            .into_iter()
            .enumerate()
            .map(|(index, (name, full, work, _))| {
                MonitorInfo::new(index, name, full).with_work_area(work)
            })
            .collect())
    }
}
