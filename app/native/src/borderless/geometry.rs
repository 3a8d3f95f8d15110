//! Monitor selection for a window.

use super::error::{BorderlessError, BorderlessResult};
use super::types::{MonitorInfo, Rect, WindowHandle};
use crate::config::MonitorFallback;
use crate::platform::WindowPlatform;

/// Where a window should go when it is made borderless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The monitor the window overlaps most, with a fallback policy.
    Auto(MonitorFallback),
    /// An explicit monitor by index.
    Monitor(usize),
}

impl Default for Placement {
    fn default() -> Self { Self::Auto(MonitorFallback::default()) }
}

/// Returns the monitor whose full area overlaps `bounds` the most.
///
/// Ties go to the lowest monitor index. Returns `None` when the rectangle
/// does not overlap any monitor.
#[must_use]
pub fn select_monitor(bounds: Rect, monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    let mut best: Option<(&MonitorInfo, i64)> = None;

    for monitor in monitors {
        let area = monitor.full_area.intersection_area(&bounds);
        if area == 0 {
            continue;
        }
        match best {
            Some((current, best_area))
                if area < best_area || (area == best_area && current.index <= monitor.index) => {}
            _ => best = Some((monitor, area)),
        }
    }

    best.map(|(monitor, _)| monitor)
}

/// Returns the monitor the window overlaps most.
///
/// # Errors
///
/// - [`BorderlessError::NoMonitors`] if no monitor is connected
/// - [`BorderlessError::WindowNotVisible`] if the window is minimized or
///   entirely off-screen
pub fn monitor_for<P: WindowPlatform + ?Sized>(
    platform: &P,
    handle: WindowHandle,
) -> BorderlessResult<MonitorInfo> {
    let monitors = platform.monitors()?;
    if monitors.is_empty() {
        return Err(BorderlessError::NoMonitors);
    }
    if platform.is_minimized(handle) {
        return Err(BorderlessError::WindowNotVisible(handle));
    }

    let bounds = platform.bounds(handle)?;
    select_monitor(bounds, &monitors)
        .cloned()
        .ok_or(BorderlessError::WindowNotVisible(handle))
}

/// Resolves the monitor a window should fill according to `placement`.
///
/// # Errors
///
/// - [`BorderlessError::MonitorNotFound`] for an out-of-range explicit index
/// - [`BorderlessError::WindowNotVisible`] if automatic selection fails and
///   the fallback policy cannot find a monitor
pub fn target_monitor<P: WindowPlatform + ?Sized>(
    platform: &P,
    handle: WindowHandle,
    placement: Placement,
) -> BorderlessResult<MonitorInfo> {
    let fallback = match placement {
        Placement::Monitor(index) => {
            return platform
                .monitors()?
                .into_iter()
                .find(|m| m.index == index)
                .ok_or(BorderlessError::MonitorNotFound(index));
        }
        Placement::Auto(fallback) => fallback,
    };

    match monitor_for(platform, handle) {
        Err(BorderlessError::WindowNotVisible(_)) => {
            tracing::debug!(handle = %handle, ?fallback, "window not on any monitor, applying fallback");
            apply_fallback(platform, handle, fallback)
        }
        other => other,
    }
}

fn apply_fallback<P: WindowPlatform + ?Sized>(
    platform: &P,
    handle: WindowHandle,
    fallback: MonitorFallback,
) -> BorderlessResult<MonitorInfo> {
    let monitors = platform.monitors()?;

    let chosen = match fallback {
        MonitorFallback::LastKnownBounds => {
            let restored = platform.restored_bounds(handle)?;
            select_monitor(restored, &monitors).cloned()
        }
        MonitorFallback::Primary => {
            monitors.iter().find(|m| m.is_primary).or_else(|| monitors.first()).cloned()
        }
        MonitorFallback::Fail => None,
    };

    chosen.ok_or(BorderlessError::WindowNotVisible(handle))
}
