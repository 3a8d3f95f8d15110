//! Maps a [`Selector`] to a concrete top-level window.

use super::error::{BorderlessError, BorderlessResult};
use super::types::{Selector, WindowHandle};
use crate::config::AmbiguityPolicy;
use crate::platform::WindowPlatform;

/// Resolves the window a selector refers to. Never mutates anything.
///
/// Only candidate windows resolve: the taskbar, the desktop, owned dialogs
/// and hidden or untitled windows never match, even when focused.
///
/// For [`Selector::ByProcessId`], a process with several candidate windows
/// is resolved according to `policy`: the foreground window wins if it
/// belongs to the process, otherwise the topmost window in Z-order.
///
/// # Errors
///
/// - [`BorderlessError::NoMatchingWindow`] if nothing matches
/// - [`BorderlessError::AmbiguousMatch`] under [`AmbiguityPolicy::Strict`]
/// - [`BorderlessError::Platform`] if window enumeration fails
pub fn resolve_target<P: WindowPlatform + ?Sized>(
    platform: &P,
    selector: Selector,
    policy: AmbiguityPolicy,
) -> BorderlessResult<WindowHandle> {
    match selector {
        Selector::ActiveWindow => platform
            .foreground_window()
            .filter(|&handle| platform.is_window(handle) && platform.is_candidate(handle))
            .ok_or(BorderlessError::NoMatchingWindow(selector)),
        Selector::ByProcessId(pid) => {
            let candidates = platform.top_level_windows(pid)?;

            match (candidates.as_slice(), policy) {
                ([], _) => Err(BorderlessError::NoMatchingWindow(selector)),
                ([only], _) => Ok(*only),
                (many, AmbiguityPolicy::Strict) => {
                    Err(BorderlessError::AmbiguousMatch { pid, count: many.len() })
                }
                (many, AmbiguityPolicy::PreferForeground) => {
                    let chosen = platform
                        .foreground_window()
                        .filter(|foreground| many.contains(foreground))
                        .unwrap_or(many[0]);
                    tracing::debug!(
                        pid,
                        candidates = many.len(),
                        handle = %chosen,
                        "resolved ambiguous process window"
                    );
                    Ok(chosen)
                }
            }
        }
    }
}
