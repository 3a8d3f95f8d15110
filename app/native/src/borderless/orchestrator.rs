//! The externally callable toggle surface.
//!
//! [`Toggler`] resolves selectors, dispatches to the [`Engine`], tags errors
//! with the selector that caused them and keeps the reapply tracker in sync
//! with what the user has made borderless.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::engine::{Engine, RestoreReport};
use super::error::{BorderlessError, ToggleError};
use super::geometry::Placement;
use super::reapply::{ReapplyTracker, TrackedProcess};
use super::resolver::resolve_target;
use super::types::{MonitorInfo, Selector, Transition, WindowHandle};
use crate::config::{AmbiguityPolicy, MonitorFallback, NoBordersConfig};
use crate::platform::WindowPlatform;

/// Result type alias for orchestrator operations.
pub type ToggleResult<T> = Result<T, ToggleError>;

/// Policies the orchestrator applies to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOptions {
    pub ambiguity: AmbiguityPolicy,
    pub fallback: MonitorFallback,
    /// Whether new windows of borderless processes are made borderless too.
    pub reapply: bool,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::default(),
            fallback: MonitorFallback::default(),
            reapply: true,
        }
    }
}

impl ToggleOptions {
    /// Builds options from the loaded configuration.
    #[must_use]
    pub const fn from_config(config: &NoBordersConfig) -> Self {
        Self {
            ambiguity: config.selection.ambiguity,
            fallback: config.monitor.fallback,
            reapply: config.reapply.enabled,
        }
    }
}

/// What a reconcile pass changed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Snapshots dropped because their window was closed.
    pub pruned: Vec<WindowHandle>,
    /// Processes no longer tracked because they exited.
    pub forgotten: Vec<u32>,
    /// New windows made borderless.
    pub reapplied: Vec<WindowHandle>,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pruned.is_empty() && self.forgotten.is_empty() && self.reapplied.is_empty()
    }
}

/// Entry point for toggle requests from hotkeys, the CLI and the watcher.
pub struct Toggler<P: WindowPlatform> {
    engine: Arc<Engine<P>>,
    options: ToggleOptions,
    tracker: Mutex<ReapplyTracker>,
}

impl<P: WindowPlatform> Toggler<P> {
    /// Creates a toggler over a fresh engine for `platform`.
    #[must_use]
    pub fn new(platform: Arc<P>, options: ToggleOptions) -> Self {
        Self::with_engine(Arc::new(Engine::new(platform)), options)
    }

    /// Creates a toggler over an existing engine.
    #[must_use]
    pub fn with_engine(engine: Arc<Engine<P>>, options: ToggleOptions) -> Self {
        Self { engine, options, tracker: Mutex::new(ReapplyTracker::new()) }
    }

    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine<P>> { &self.engine }

    #[must_use]
    pub const fn options(&self) -> ToggleOptions { self.options }

    /// Toggles the window the selector resolves to.
    ///
    /// # Errors
    ///
    /// Returns the resolver or engine error, tagged with `selector`.
    pub fn toggle(&self, selector: Selector) -> ToggleResult<Transition> {
        let handle = self.resolve(selector)?;
        let transition = self
            .engine
            .toggle(handle, Placement::Auto(self.options.fallback))
            .map_err(|err| ToggleError::new(selector, err))?;

        self.record(handle, transition, None);
        tracing::info!(%selector, handle = %handle, %transition, "toggled window");
        Ok(transition)
    }

    /// Makes the selected window borderless, on `monitor` if given.
    ///
    /// # Errors
    ///
    /// Returns the resolver or engine error, tagged with `selector`.
    pub fn enter(&self, selector: Selector, monitor: Option<usize>) -> ToggleResult<Transition> {
        let handle = self.resolve(selector)?;
        let placement = monitor.map_or(Placement::Auto(self.options.fallback), Placement::Monitor);
        let transition = self
            .engine
            .enter_borderless(handle, placement)
            .map_err(|err| ToggleError::new(selector, err))?;

        self.record(handle, transition, monitor);
        Ok(transition)
    }

    /// Reverts the selected window to its windowed state.
    ///
    /// # Errors
    ///
    /// Returns the resolver or engine error, tagged with `selector`.
    pub fn exit(&self, selector: Selector) -> ToggleResult<Transition> {
        let handle = self.resolve(selector)?;
        let transition =
            self.engine.exit_borderless(handle).map_err(|err| ToggleError::new(selector, err))?;

        self.record(handle, transition, None);
        Ok(transition)
    }

    /// Moves the selected borderless window to another monitor.
    ///
    /// # Errors
    ///
    /// Returns the resolver or engine error, tagged with `selector`.
    pub fn move_to_monitor(&self, selector: Selector, index: usize) -> ToggleResult<MonitorInfo> {
        let handle = self.resolve(selector)?;
        let monitor = self
            .engine
            .move_to_monitor(handle, index)
            .map_err(|err| ToggleError::new(selector, err))?;

        if let Some(pid) = self.engine.platform().process_id(handle) {
            let mut tracker = self.tracker.lock();
            let name = tracker.get(pid).map(|process| process.name.clone());
            if let Some(name) = name {
                tracker.track(pid, name, Some(index), [handle]);
            }
        }
        Ok(monitor)
    }

    /// Restores every borderless window and stops tracking all processes.
    pub fn shutdown_restore_all(&self) -> RestoreReport {
        self.tracker.lock().clear();
        self.engine.restore_all()
    }

    /// Prunes closed windows, forgets exited processes and makes new windows
    /// of tracked processes borderless.
    pub fn reconcile(&self) -> ReconcileReport {
        let platform = self.engine.platform();
        let mut report =
            ReconcileReport { pruned: self.engine.prune_stale(), ..ReconcileReport::default() };

        let mut tracker = self.tracker.lock();

        let exited: Vec<u32> = tracker
            .processes()
            .filter(|process| {
                platform.process_name(process.pid).is_none_or(|name| name != process.name)
            })
            .map(|process| process.pid)
            .collect();
        for pid in exited {
            tracker.forget(pid);
            tracing::debug!(pid, "stopped tracking exited process");
            report.forgotten.push(pid);
        }

        let processes: Vec<TrackedProcess> = tracker.processes().cloned().collect();
        for process in processes {
            let windows = match platform.top_level_windows(process.pid) {
                Ok(windows) => windows,
                Err(err) => {
                    tracing::warn!(pid = process.pid, error = %err, "failed to list process windows");
                    continue;
                }
            };

            for handle in windows {
                if !process.is_new_window(handle) || self.engine.is_borderless(handle) {
                    continue;
                }
                tracker.mark_known(process.pid, handle);

                let placement = process
                    .monitor
                    .map_or(Placement::Auto(self.options.fallback), Placement::Monitor);
                match self.engine.enter_borderless(handle, placement) {
                    Ok(Transition::Entered) => {
                        tracing::info!(
                            pid = process.pid,
                            process = %process.name,
                            handle = %handle,
                            "reapplied borderless to new window"
                        );
                        report.reapplied.push(handle);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(
                            pid = process.pid,
                            handle = %handle,
                            error = %err,
                            "failed to reapply borderless"
                        );
                    }
                }
            }
        }

        report
    }

    /// Processes whose new windows are made borderless automatically.
    #[must_use]
    pub fn tracked_processes(&self) -> Vec<TrackedProcess> {
        self.tracker.lock().processes().cloned().collect()
    }

    fn resolve(&self, selector: Selector) -> ToggleResult<WindowHandle> {
        resolve_target(&**self.engine.platform(), selector, self.options.ambiguity)
            .map_err(|err| ToggleError::new(selector, err))
    }

    fn record(&self, handle: WindowHandle, transition: Transition, monitor: Option<usize>) {
        if !self.options.reapply {
            return;
        }
        let platform = self.engine.platform();
        let Some(pid) = platform.process_id(handle) else {
            return;
        };

        match transition {
            Transition::Entered => {
                let Some(name) = platform.process_name(pid) else {
                    return;
                };
                let existing = platform.top_level_windows(pid).unwrap_or_default();
                self.tracker.lock().track(pid, name, monitor, existing);
            }
            Transition::Exited => {
                if self.tracker.lock().forget(pid) {
                    tracing::debug!(pid, "stopped tracking process");
                }
            }
            Transition::AlreadyBorderless | Transition::AlreadyNormal | Transition::Discarded => {}
        }
    }
}

/// Returns `true` if the error means the request had nothing to act on.
///
/// The hotkey daemon logs these at a lower level than real failures.
#[must_use]
pub const fn is_benign(err: &ToggleError) -> bool {
    matches!(err.source, BorderlessError::NoMatchingWindow(_) | BorderlessError::WindowNotVisible(_))
}
