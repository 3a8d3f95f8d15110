//! Win32 hotkey registration and message loop.
//!
//! Hotkeys are registered for the calling thread (no window), so `WM_HOTKEY`
//! arrives in that thread's message queue. Console Ctrl+C/close events post
//! `WM_QUIT` to the same queue to end the loop. On close, logoff and system
//! shutdown the handler then holds the process open until [`TEARDOWN`] is
//! completed.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU32, Ordering};

use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Console::SetConsoleCtrlHandler;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, PostThreadMessageW, WM_HOTKEY, WM_QUIT};
use windows::core::BOOL;

use super::{HotkeyAction, HotkeyBinding, TEARDOWN, TEARDOWN_TIMEOUT, ends_process};

/// Thread that runs the message loop, for the console control handler.
static LOOP_THREAD: AtomicU32 = AtomicU32::new(0);

/// Hotkeys registered for the current thread, unregistered on drop.
pub struct HotkeyRegistration {
    bindings: Vec<HotkeyBinding>,
}

impl HotkeyRegistration {
    /// Registers every binding for the calling thread.
    ///
    /// Shortcuts already taken by another program are logged and skipped.
    #[must_use]
    pub fn register(bindings: &[HotkeyBinding]) -> Self {
        let mut registered = Vec::new();

        for binding in bindings {
            let modifiers = HOT_KEY_MODIFIERS(binding.shortcut.modifiers) | MOD_NOREPEAT;
            let result = unsafe { RegisterHotKey(None, binding.id, modifiers, binding.shortcut.key) };

            match result {
                Ok(()) => {
                    tracing::info!(action = ?binding.action, shortcut = %binding.shortcut, "registered hotkey");
                    registered.push(*binding);
                }
                Err(err) => {
                    tracing::warn!(
                        action = ?binding.action,
                        shortcut = %binding.shortcut,
                        error = %err,
                        "failed to register hotkey, it may be in use"
                    );
                }
            }
        }

        Self { bindings: registered }
    }

    /// Number of hotkeys that were registered successfully.
    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Pumps the thread's message queue until `handler` breaks, `WM_QUIT`
    /// arrives or the console is interrupted.
    pub fn run<F>(&self, mut handler: F)
    where F: FnMut(HotkeyAction) -> ControlFlow<()> {
        LOOP_THREAD.store(unsafe { GetCurrentThreadId() }, Ordering::SeqCst);
        if let Err(err) = unsafe { SetConsoleCtrlHandler(Some(console_handler), true) } {
            tracing::warn!(error = %err, "failed to install console control handler");
        }

        let mut msg = MSG::default();
        // GetMessageW returns 0 for WM_QUIT and -1 on error
        while unsafe { GetMessageW(&raw mut msg, None, 0, 0) }.0 > 0 {
            if msg.message != WM_HOTKEY {
                continue;
            }

            let id = msg.wParam.0;
            let Some(binding) = self.bindings.iter().find(|b| usize::try_from(b.id) == Ok(id)) else {
                continue;
            };

            tracing::debug!(action = ?binding.action, "hotkey pressed");
            if handler(binding.action).is_break() {
                break;
            }
        }

        LOOP_THREAD.store(0, Ordering::SeqCst);
    }
}

impl Drop for HotkeyRegistration {
    fn drop(&mut self) {
        for binding in &self.bindings {
            let _ = unsafe { UnregisterHotKey(None, binding.id) };
        }
    }
}

/// Ends the message loop on Ctrl+C, Ctrl+Break or console close.
///
/// Runs on a thread the system creates for the event.
unsafe extern "system" fn console_handler(ctrl_type: u32) -> BOOL {
    let thread = LOOP_THREAD.load(Ordering::SeqCst);
    let posted = thread != 0
        && unsafe { PostThreadMessageW(thread, WM_QUIT, WPARAM(0), LPARAM(0)) }.is_ok();

    if ends_process(ctrl_type) {
        // The process is terminated once this returns
        if !TEARDOWN.wait(TEARDOWN_TIMEOUT) {
            tracing::warn!(ctrl_type, "console closed before windows were restored");
        }
        return BOOL::from(true);
    }

    BOOL::from(posted)
}
