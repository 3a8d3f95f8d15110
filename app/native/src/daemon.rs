//! The hotkey daemon.
//!
//! Runs until the quit hotkey or a console interrupt, then restores every
//! borderless window. Two trigger sources share one [`Toggler`]:
//!
//! - the hotkey message loop on the main thread
//! - the watcher thread, which periodically reconciles tracked windows

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::borderless::{RestoreReport, Selector, Toggler, is_benign};
use crate::error::NoBordersError;
use crate::hotkey::HotkeyAction;
use crate::platform::{WindowPlatform, spawn_named_thread};

/// Windows to make borderless when the daemon starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaemonOptions {
    /// Processes whose main window is made borderless.
    pub pids: Vec<u32>,
    /// Monitor to place them on; the window's own monitor if `None`.
    pub monitor: Option<usize>,
}

/// Makes each startup process borderless, logging failures.
///
/// Returns the number of processes that were made borderless.
pub fn apply_startup_targets<P: WindowPlatform>(toggler: &Toggler<P>, options: &DaemonOptions) -> usize {
    let mut applied = 0;

    for &pid in &options.pids {
        match toggler.enter(Selector::ByProcessId(pid), options.monitor) {
            Ok(transition) => {
                tracing::info!(pid, %transition, "applied startup target");
                applied += 1;
            }
            Err(err) => tracing::warn!(pid, error = %err, "failed to apply startup target"),
        }
    }

    applied
}

/// Handles one hotkey press.
pub fn handle_action<P: WindowPlatform>(toggler: &Toggler<P>, action: HotkeyAction) -> ControlFlow<()> {
    match action {
        HotkeyAction::Toggle => {
            if let Err(err) = toggler.toggle(Selector::ActiveWindow) {
                if is_benign(&err) {
                    tracing::debug!(error = %err, "nothing to toggle");
                } else {
                    tracing::warn!(error = %err, "toggle failed");
                }
            }
            ControlFlow::Continue(())
        }
        HotkeyAction::Quit => {
            tracing::info!("quit requested");
            ControlFlow::Break(())
        }
    }
}

/// Restores every borderless window and logs the outcome.
pub fn shutdown<P: WindowPlatform>(toggler: &Toggler<P>) -> RestoreReport {
    let report = toggler.shutdown_restore_all();

    for (handle, err) in &report.failed {
        tracing::error!(handle = %handle, error = %err, "failed to restore window");
    }
    tracing::info!(
        restored = report.restored.len(),
        discarded = report.discarded.len(),
        failed = report.failed.len(),
        "restored borderless windows"
    );

    report
}

/// Background thread that reconciles the toggler at a fixed interval.
pub struct Watcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    /// Starts reconciling every `interval`.
    #[must_use]
    pub fn start<P>(toggler: Arc<Toggler<P>>, interval: Duration) -> Self
    where P: WindowPlatform + 'static {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = spawn_named_thread("watcher", move || {
            tracing::debug!(interval_ms = interval.as_millis(), "watcher started");
            loop {
                thread::park_timeout(interval);
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }

                let report = toggler.reconcile();
                if !report.is_empty() {
                    tracing::debug!(
                        pruned = report.pruned.len(),
                        forgotten = report.forgotten.len(),
                        reapplied = report.reapplied.len(),
                        "reconciled windows"
                    );
                }
            }
            tracing::debug!("watcher stopped");
        });

        Self { stop, handle }
    }

    /// Returns `true` if the watcher thread is alive.
    #[must_use]
    pub fn is_running(&self) -> bool { self.handle.as_ref().is_some_and(|h| !h.is_finished()) }

    /// Signals the thread and waits for it to finish its current pass.
    pub fn stop(mut self) { self.shutdown(); }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::error!("watcher thread panicked");
            }
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) { self.shutdown(); }
}

/// Runs the daemon until quit.
///
/// # Errors
///
/// Returns an error if none of the configured hotkeys could be registered.
#[cfg(windows)]
pub fn run(options: &DaemonOptions) -> Result<(), NoBordersError> {
    use crate::borderless::ToggleOptions;
    use crate::hotkey::bindings_from_config;
    use crate::hotkey::win32::HotkeyRegistration;
    use crate::platform::Win32Platform;

    let config = crate::config::get_config();
    let platform = Arc::new(Win32Platform::new());
    let toggler = Arc::new(Toggler::new(platform, ToggleOptions::from_config(config)));

    apply_startup_targets(&toggler, options);

    let registration = HotkeyRegistration::register(&bindings_from_config(&config.hotkeys));
    if registration.is_empty() {
        shutdown(&toggler);
        crate::hotkey::TEARDOWN.complete();
        return Err(NoBordersError::HotkeyError("no hotkey could be registered".to_string()));
    }

    let watcher = Watcher::start(Arc::clone(&toggler), config.reapply.interval());
    tracing::info!(hotkeys = registration.len(), "noborders is running");

    registration.run(|action| handle_action(&toggler, action));

    watcher.stop();
    drop(registration);
    shutdown(&toggler);
    crate::hotkey::TEARDOWN.complete();
    Ok(())
}

/// Runs the daemon until quit.
///
/// # Errors
///
/// Always returns [`NoBordersError::UnsupportedPlatform`].
#[cfg(not(windows))]
pub fn run(_options: &DaemonOptions) -> Result<(), NoBordersError> {
    Err(NoBordersError::UnsupportedPlatform("run".to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::borderless::{Rect, ToggleOptions};
    use crate::platform::{MemoryPlatform, MemoryWindow};

    fn setup() -> (Arc<MemoryPlatform>, Arc<Toggler<MemoryPlatform>>) {
        let platform = Arc::new(MemoryPlatform::dual_monitor());
        let toggler = Arc::new(Toggler::new(Arc::clone(&platform), ToggleOptions::default()));
        (platform, toggler)
    }

    #[test]
    fn test_toggle_action_continues() {
        let (platform, toggler) = setup();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(100, 100, 800, 600)));
        platform.focus(handle);

        assert_eq!(handle_action(&toggler, HotkeyAction::Toggle), ControlFlow::Continue(()));
        assert!(toggler.engine().is_borderless(handle));

        assert_eq!(handle_action(&toggler, HotkeyAction::Toggle), ControlFlow::Continue(()));
        assert!(!toggler.engine().is_borderless(handle));
    }

    #[test]
    fn test_toggle_without_focus_continues() {
        let (_platform, toggler) = setup();
        assert_eq!(handle_action(&toggler, HotkeyAction::Toggle), ControlFlow::Continue(()));
    }

    #[test]
    fn test_quit_action_breaks() {
        let (_platform, toggler) = setup();
        assert_eq!(handle_action(&toggler, HotkeyAction::Quit), ControlFlow::Break(()));
    }

    #[test]
    fn test_startup_targets_skip_missing_processes() {
        let (platform, toggler) = setup();
        let handle = platform.open(MemoryWindow::new(10, Rect::new(100, 100, 800, 600)).with_title("Game"));

        let options = DaemonOptions { pids: vec![10, 99], monitor: Some(1) };
        assert_eq!(apply_startup_targets(&toggler, &options), 1);

        let window = platform.window(handle).unwrap();
        assert_eq!(window.bounds, Rect::new(1920, 0, 1920, 1080));
    }

    #[test]
    fn test_shutdown_restores_everything() {
        let (platform, toggler) = setup();
        let original = Rect::new(100, 100, 800, 600);
        let handle = platform.open(MemoryWindow::new(10, original).with_title("Game"));
        apply_startup_targets(&toggler, &DaemonOptions { pids: vec![10], monitor: None });

        let report = shutdown(&toggler);
        assert_eq!(report.restored, vec![handle]);
        assert!(report.is_clean());
        assert_eq!(platform.window(handle).unwrap().bounds, original);
        assert!(toggler.tracked_processes().is_empty());
    }

    #[test]
    fn test_watcher_reapplies_and_stops() {
        let (platform, toggler) = setup();
        platform.open(MemoryWindow::new(10, Rect::new(100, 100, 800, 600)).with_title("Launcher"));
        apply_startup_targets(&toggler, &DaemonOptions { pids: vec![10], monitor: None });

        let watcher = Watcher::start(Arc::clone(&toggler), Duration::from_millis(10));
        assert!(watcher.is_running());

        let game = platform.open(MemoryWindow::new(10, Rect::new(200, 200, 640, 480)).with_title("Game"));
        let deadline = Instant::now() + Duration::from_secs(5);
        while !toggler.engine().is_borderless(game) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        watcher.stop();
        assert!(toggler.engine().is_borderless(game));
    }

    #[test]
    fn test_watcher_stops_promptly_with_long_interval() {
        let (_platform, toggler) = setup();
        let watcher = Watcher::start(toggler, Duration::from_secs(3600));

        let started = Instant::now();
        watcher.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_run_is_unsupported_off_windows() {
        let err = run(&DaemonOptions::default()).unwrap_err();
        assert!(matches!(err, NoBordersError::UnsupportedPlatform(_)));
    }
}
