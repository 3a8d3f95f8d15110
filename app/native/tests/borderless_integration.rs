//! End-to-end tests of the toggle surface against the in-memory platform.
//!
//! These drive `Toggler` the way the hotkey daemon does: resolve a selector,
//! toggle, reconcile, and restore everything on shutdown.

use std::sync::Arc;

use noborders_lib::borderless::{
    BorderlessError, ExtendedStyle, Rect, Selector, ToggleOptions, Toggler, Transition,
    WindowStyle,
};
use noborders_lib::config::{AmbiguityPolicy, MonitorFallback};
use noborders_lib::platform::{MemoryPlatform, MemoryWindow, Operation, WindowPlatform};

const OVERLAPPED: u32 = 0x14CF_0000;

fn desktop(options: ToggleOptions) -> (Arc<MemoryPlatform>, Toggler<MemoryPlatform>) {
    let platform = Arc::new(MemoryPlatform::dual_monitor());
    let toggler = Toggler::new(Arc::clone(&platform), options);
    (platform, toggler)
}

// ============================================================================
// Toggle Round Trip
// ============================================================================

#[test]
fn test_focused_window_round_trip() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let original = Rect::new(1800, 0, 200, 200);
    let handle = platform.open(MemoryWindow::new(7, original).with_title("Editor"));
    platform.focus(handle);

    assert_eq!(toggler.toggle(Selector::ActiveWindow).unwrap(), Transition::Entered);
    let window = platform.window(handle).unwrap();
    // Mostly on the left monitor
    assert_eq!(window.bounds, Rect::new(0, 0, 1920, 1080));
    assert_eq!(window.style.bits(), 0x1400_0000);
    assert!(!window.style.has_chrome());

    assert_eq!(toggler.toggle(Selector::ActiveWindow).unwrap(), Transition::Exited);
    let window = platform.window(handle).unwrap();
    assert_eq!(window.bounds, original);
    assert_eq!(window.style, WindowStyle::from_bits(OVERLAPPED));
    assert!(!toggler.engine().is_borderless(handle));
}

#[test]
fn test_custom_styles_survive_round_trip() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let style = WindowStyle::from_bits(0x16CF_0000);
    let extended = ExtendedStyle::from_bits(0x0000_0301);
    let handle = platform
        .open(MemoryWindow::new(7, Rect::new(2000, 100, 800, 600)).with_styles(style, extended));

    toggler.enter(Selector::ByProcessId(7), None).unwrap();
    let window = platform.window(handle).unwrap();
    assert_eq!(window.extended_style, extended.without_chrome());
    assert_eq!(window.bounds, Rect::new(1920, 0, 1920, 1080));

    toggler.exit(Selector::ByProcessId(7)).unwrap();
    let window = platform.window(handle).unwrap();
    assert_eq!(window.style, style);
    assert_eq!(window.extended_style, extended);
}

#[test]
fn test_maximized_window_comes_back_maximized() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let handle = platform.open(MemoryWindow::new(7, Rect::new(100, 100, 800, 600)));
    platform.maximize(handle).unwrap();
    platform.focus(handle);

    toggler.toggle(Selector::ActiveWindow).unwrap();
    assert!(!platform.is_maximized(handle));
    assert_eq!(platform.window(handle).unwrap().bounds, Rect::new(0, 0, 1920, 1080));

    toggler.toggle(Selector::ActiveWindow).unwrap();
    assert!(platform.is_maximized(handle));

    // Un-maximizing returns to the pre-maximize placement
    platform.restore(handle).unwrap();
    assert_eq!(platform.window(handle).unwrap().bounds, Rect::new(100, 100, 800, 600));
}

#[test]
fn test_repeated_enter_does_not_recapture() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let original = Rect::new(100, 100, 800, 600);
    let handle = platform.open(MemoryWindow::new(7, original));

    assert_eq!(toggler.enter(Selector::ByProcessId(7), None).unwrap(), Transition::Entered);
    assert_eq!(
        toggler.enter(Selector::ByProcessId(7), None).unwrap(),
        Transition::AlreadyBorderless
    );

    toggler.exit(Selector::ByProcessId(7)).unwrap();
    assert_eq!(platform.window(handle).unwrap().bounds, original);
}

// ============================================================================
// Resolution and Placement
// ============================================================================

#[test]
fn test_strict_policy_rejects_multi_window_process() {
    let options = ToggleOptions { ambiguity: AmbiguityPolicy::Strict, ..ToggleOptions::default() };
    let (platform, toggler) = desktop(options);
    platform.open(MemoryWindow::new(7, Rect::new(0, 0, 400, 300)));
    platform.open(MemoryWindow::new(7, Rect::new(500, 0, 400, 300)));

    let err = toggler.toggle(Selector::ByProcessId(7)).unwrap_err();
    assert_eq!(err.selector, Selector::ByProcessId(7));
    assert!(matches!(err.source, BorderlessError::AmbiguousMatch { pid: 7, count: 2 }));
}

#[test]
fn test_prefer_foreground_picks_focused_window_of_process() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let first = platform.open(MemoryWindow::new(7, Rect::new(0, 0, 400, 300)));
    let second = platform.open(MemoryWindow::new(7, Rect::new(500, 0, 400, 300)));
    platform.focus(first);

    toggler.toggle(Selector::ByProcessId(7)).unwrap();
    assert!(toggler.engine().is_borderless(first));
    assert!(!toggler.engine().is_borderless(second));
}

#[test]
fn test_unknown_process_is_not_found() {
    let (_platform, toggler) = desktop(ToggleOptions::default());
    let err = toggler.toggle(Selector::ByProcessId(404)).unwrap_err();
    assert!(err.source.is_not_found());
    assert!(noborders_lib::borderless::is_benign(&err));
}

#[test]
fn test_minimized_window_uses_fallback_policy() {
    let options = ToggleOptions { fallback: MonitorFallback::Fail, ..ToggleOptions::default() };
    let (platform, toggler) = desktop(options);
    let handle = platform.open(MemoryWindow::new(7, Rect::new(2000, 100, 800, 600)));
    platform.minimize(handle).unwrap();
    platform.focus(handle);

    // The engine restores minimized windows before measuring them
    toggler.toggle(Selector::ActiveWindow).unwrap();
    assert_eq!(platform.window(handle).unwrap().bounds, Rect::new(1920, 0, 1920, 1080));
}

#[test]
fn test_move_between_monitors_keeps_original_state() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let original = Rect::new(100, 100, 800, 600);
    let handle = platform.open(MemoryWindow::new(7, original));

    toggler.enter(Selector::ByProcessId(7), None).unwrap();
    let monitor = toggler.move_to_monitor(Selector::ByProcessId(7), 1).unwrap();
    assert_eq!(monitor.index, 1);
    assert_eq!(platform.window(handle).unwrap().bounds, Rect::new(1920, 0, 1920, 1080));

    toggler.exit(Selector::ByProcessId(7)).unwrap();
    assert_eq!(platform.window(handle).unwrap().bounds, original);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_style_failure_leaves_window_untouched() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let original = Rect::new(100, 100, 800, 600);
    let handle = platform.open(MemoryWindow::new(7, original));
    platform.fail(handle, Operation::SetStyles);

    let err = toggler.enter(Selector::ByProcessId(7), None).unwrap_err();
    assert!(matches!(err.source, BorderlessError::StyleApplyFailed { .. }));
    assert!(err.source.is_platform_failure());
    assert!(!toggler.engine().is_borderless(handle));
    assert!(toggler.tracked_processes().is_empty());
    assert_eq!(platform.window(handle).unwrap().bounds, original);

    platform.clear_failures();
    assert_eq!(toggler.enter(Selector::ByProcessId(7), None).unwrap(), Transition::Entered);
}

#[test]
fn test_closed_window_is_discarded_on_exit() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let handle = platform.open(MemoryWindow::new(7, Rect::new(100, 100, 800, 600)));
    toggler.enter(Selector::ByProcessId(7), None).unwrap();

    platform.close(handle);
    let report = toggler.reconcile();
    assert_eq!(report.pruned, vec![handle]);
    assert!(toggler.engine().tracked().is_empty());
}

// ============================================================================
// Reapply and Teardown
// ============================================================================

#[test]
fn test_new_window_of_tracked_process_follows_monitor() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    platform.open(MemoryWindow::new(7, Rect::new(100, 100, 800, 600)).with_title("Launcher"));
    toggler.enter(Selector::ByProcessId(7), Some(1)).unwrap();

    let game = platform.open(MemoryWindow::new(7, Rect::new(200, 200, 1280, 720)).with_title("Game"));
    let report = toggler.reconcile();
    assert_eq!(report.reapplied, vec![game]);
    assert_eq!(platform.window(game).unwrap().bounds, Rect::new(1920, 0, 1920, 1080));

    // Already handled windows are not picked up again
    assert!(toggler.reconcile().is_empty());
}

#[test]
fn test_exited_process_is_forgotten() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    platform.open(MemoryWindow::new(7, Rect::new(100, 100, 800, 600)));
    toggler.enter(Selector::ByProcessId(7), None).unwrap();
    assert_eq!(toggler.tracked_processes().len(), 1);

    platform.kill(7);
    let report = toggler.reconcile();
    assert_eq!(report.forgotten, vec![7]);
    assert_eq!(report.pruned.len(), 1);
    assert!(toggler.tracked_processes().is_empty());
}

#[test]
fn test_shutdown_restores_all_despite_failure() {
    let (platform, toggler) = desktop(ToggleOptions::default());
    let first_bounds = Rect::new(100, 100, 800, 600);
    let second_bounds = Rect::new(2000, 200, 640, 480);
    let first = platform.open(MemoryWindow::new(7, first_bounds));
    let second = platform.open(MemoryWindow::new(8, second_bounds));
    toggler.enter(Selector::ByProcessId(7), None).unwrap();
    toggler.enter(Selector::ByProcessId(8), None).unwrap();
    platform.fail(first, Operation::SetBounds);

    let report = toggler.shutdown_restore_all();
    assert_eq!(report.restored, vec![second]);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].1, BorderlessError::RestoreFailed { .. }));
    assert_eq!(platform.window(second).unwrap().bounds, second_bounds);
    assert!(toggler.engine().tracked().is_empty());
    assert!(toggler.tracked_processes().is_empty());
}
