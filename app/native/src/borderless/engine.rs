//! The transformation engine.
//!
//! Applies and reverts the borderless transformation for individual windows.
//! Each window is either `Normal` or `Borderless`, and the state store is the
//! single source of truth for which one: a window is borderless exactly when
//! the store holds its snapshot.
//!
//! Every public operation holds the store lock for its whole duration, so a
//! hotkey press and the watcher thread can never interleave on one window.

use std::sync::Arc;

use parking_lot::Mutex;

use super::error::{BorderlessError, BorderlessResult, PlatformError};
use super::geometry::{Placement, select_monitor, target_monitor};
use super::store::StateStore;
use super::style::{ExtendedStyle, WindowStyle};
use super::types::{MonitorInfo, Transition, WindowHandle, WindowStyleSnapshot};
use crate::platform::WindowPlatform;

/// Outcome of a teardown pass over all borderless windows.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Windows put back into their original state.
    pub restored: Vec<WindowHandle>,
    /// Windows that no longer existed.
    pub discarded: Vec<WindowHandle>,
    /// Windows whose restore failed; their snapshots are gone.
    pub failed: Vec<(WindowHandle, BorderlessError)>,
}

impl RestoreReport {
    /// Returns `true` if every window was restored or discarded.
    #[must_use]
    pub fn is_clean(&self) -> bool { self.failed.is_empty() }
}

/// Show state a window was in before `enter` normalized it.
#[derive(Debug, Clone, Copy)]
struct Placed {
    was_maximized: bool,
    was_minimized: bool,
}

/// Applies and reverts borderless fullscreen on top of a [`WindowPlatform`].
pub struct Engine<P: WindowPlatform> {
    platform: Arc<P>,
    store: Mutex<StateStore>,
}

impl<P: WindowPlatform> Engine<P> {
    /// Creates an engine with an empty state store.
    #[must_use]
    pub fn new(platform: Arc<P>) -> Self { Self { platform, store: Mutex::new(StateStore::new()) } }

    /// The platform this engine drives.
    #[must_use]
    pub fn platform(&self) -> &Arc<P> { &self.platform }

    /// Flips the window between normal and borderless.
    ///
    /// # Errors
    ///
    /// See [`Self::enter_borderless`] and [`Self::exit_borderless`].
    pub fn toggle(&self, handle: WindowHandle, placement: Placement) -> BorderlessResult<Transition> {
        let mut store = self.store.lock();

        if store.has(handle) {
            self.exit_locked(&mut store, handle)
        } else {
            self.enter_locked(&mut store, handle, placement)
        }
    }

    /// Makes a window borderless fullscreen.
    ///
    /// Returns [`Transition::AlreadyBorderless`] without touching the window
    /// if it is already borderless.
    ///
    /// # Errors
    ///
    /// - [`BorderlessError::InvalidHandle`] if the window no longer exists
    /// - geometry errors if no target monitor can be found
    /// - [`BorderlessError::StyleApplyFailed`] or
    ///   [`BorderlessError::BoundsApplyFailed`] if the window manager rejects
    ///   a write
    ///
    /// On error no snapshot is left behind.
    pub fn enter_borderless(
        &self,
        handle: WindowHandle,
        placement: Placement,
    ) -> BorderlessResult<Transition> {
        let mut store = self.store.lock();
        self.enter_locked(&mut store, handle, placement)
    }

    /// Restores a borderless window to its original state.
    ///
    /// Returns [`Transition::AlreadyNormal`] if the window is not borderless,
    /// and [`Transition::Discarded`] if the window was destroyed meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`BorderlessError::RestoreFailed`] if a write is rejected. The
    /// snapshot is consumed either way.
    pub fn exit_borderless(&self, handle: WindowHandle) -> BorderlessResult<Transition> {
        let mut store = self.store.lock();
        self.exit_locked(&mut store, handle)
    }

    /// Moves a borderless window onto another monitor's full area.
    ///
    /// The snapshot is left untouched, so exiting still restores the
    /// original placement.
    ///
    /// # Errors
    ///
    /// - [`BorderlessError::NotCaptured`] if the window is not borderless
    /// - [`BorderlessError::InvalidHandle`] if it was destroyed (the stale
    ///   snapshot is discarded)
    /// - [`BorderlessError::MonitorNotFound`] for an unknown index
    /// - [`BorderlessError::BoundsApplyFailed`] if the move is rejected
    pub fn move_to_monitor(
        &self,
        handle: WindowHandle,
        index: usize,
    ) -> BorderlessResult<MonitorInfo> {
        let mut store = self.store.lock();

        if !store.has(handle) {
            return Err(BorderlessError::NotCaptured(handle));
        }
        if !self.platform.is_window(handle) {
            store.discard(handle);
            return Err(BorderlessError::InvalidHandle(handle));
        }

        let monitor = target_monitor(&*self.platform, handle, Placement::Monitor(index))?;
        self.platform
            .set_bounds(handle, monitor.full_area)
            .map_err(|source| BorderlessError::bounds_apply(handle, source))?;

        tracing::info!(handle = %handle, monitor = monitor.index, "moved borderless window");
        Ok(monitor)
    }

    /// Discards snapshots of windows that no longer exist.
    pub fn prune_stale(&self) -> Vec<WindowHandle> {
        let mut store = self.store.lock();
        let stale: Vec<_> =
            store.handles().into_iter().filter(|&h| !self.platform.is_window(h)).collect();

        for &handle in &stale {
            store.discard(handle);
            tracing::debug!(handle = %handle, "discarded snapshot of closed window");
        }
        stale
    }

    /// Attempts to restore every borderless window, continuing past failures.
    ///
    /// The store is empty afterwards.
    pub fn restore_all(&self) -> RestoreReport {
        let mut store = self.store.lock();
        let mut report = RestoreReport::default();

        for handle in store.handles() {
            match self.exit_locked(&mut store, handle) {
                Ok(Transition::Discarded) => report.discarded.push(handle),
                Ok(_) => report.restored.push(handle),
                Err(err) => {
                    tracing::warn!(handle = %handle, error = %err, "failed to restore window");
                    report.failed.push((handle, err));
                }
            }
        }

        tracing::info!(
            restored = report.restored.len(),
            discarded = report.discarded.len(),
            failed = report.failed.len(),
            "restored borderless windows"
        );
        report
    }

    #[must_use]
    pub fn is_borderless(&self, handle: WindowHandle) -> bool { self.store.lock().has(handle) }

    /// Returns a copy of the stored snapshot for a borderless window.
    #[must_use]
    pub fn snapshot(&self, handle: WindowHandle) -> Option<WindowStyleSnapshot> {
        self.store.lock().get(handle).copied()
    }

    /// All borderless windows.
    #[must_use]
    pub fn tracked(&self) -> Vec<WindowHandle> { self.store.lock().handles() }

    // ========================================================================
    // Transitions (store lock held)
    // ========================================================================

    fn enter_locked(
        &self,
        store: &mut StateStore,
        handle: WindowHandle,
        placement: Placement,
    ) -> BorderlessResult<Transition> {
        if store.has(handle) {
            tracing::debug!(handle = %handle, "window is already borderless");
            return Ok(Transition::AlreadyBorderless);
        }
        if !self.platform.is_window(handle) {
            return Err(BorderlessError::InvalidHandle(handle));
        }

        let platform = &*self.platform;

        let was_minimized = platform.is_minimized(handle);
        if was_minimized {
            platform.restore(handle).map_err(|source| BorderlessError::bounds_apply(handle, source))?;
        }

        let was_maximized = platform.is_maximized(handle);
        if was_maximized
            && let Err(source) = platform.restore(handle)
        {
            self.roll_back(handle, None, Placed { was_maximized: false, was_minimized });
            return Err(BorderlessError::bounds_apply(handle, source));
        }
        let placed = Placed { was_maximized, was_minimized };

        let read = platform
            .styles(handle)
            .and_then(|styles| platform.bounds(handle).map(|bounds| (styles, bounds)));
        let ((style, extended_style), bounds) = match read {
            Ok(read) => read,
            Err(err) => {
                self.roll_back(handle, None, placed);
                return Err(err.into());
            }
        };

        let snapshot = WindowStyleSnapshot { handle, style, extended_style, bounds, was_maximized };
        store.capture(snapshot)?;

        let monitor = match target_monitor(platform, handle, placement) {
            Ok(monitor) => monitor,
            Err(err) => {
                store.discard(handle);
                self.roll_back(handle, None, placed);
                return Err(err);
            }
        };

        if let Err(source) =
            platform.set_styles(handle, style.without_chrome(), extended_style.without_chrome())
        {
            store.discard(handle);
            self.roll_back(handle, Some((style, extended_style)), placed);
            return Err(BorderlessError::style_apply(handle, source));
        }

        if let Err(source) = platform.set_bounds(handle, monitor.full_area) {
            store.discard(handle);
            self.roll_back(handle, Some((style, extended_style)), placed);
            return Err(BorderlessError::bounds_apply(handle, source));
        }

        tracing::info!(
            handle = %handle,
            monitor = monitor.index,
            bounds = %monitor.full_area,
            "entered borderless fullscreen"
        );
        Ok(Transition::Entered)
    }

    fn exit_locked(
        &self,
        store: &mut StateStore,
        handle: WindowHandle,
    ) -> BorderlessResult<Transition> {
        if !store.has(handle) {
            tracing::debug!(handle = %handle, "window is already windowed");
            return Ok(Transition::AlreadyNormal);
        }

        let snapshot = store.take(handle)?;
        let platform = &*self.platform;

        if !platform.is_window(handle) {
            tracing::info!(handle = %handle, "window closed while borderless, discarding state");
            return Ok(Transition::Discarded);
        }

        let restore_err = |source: PlatformError| BorderlessError::restore(handle, source);

        if platform.is_minimized(handle) {
            platform.restore(handle).map_err(restore_err)?;
        }
        platform.set_styles(handle, snapshot.style, snapshot.extended_style).map_err(restore_err)?;
        platform.set_bounds(handle, snapshot.bounds).map_err(restore_err)?;
        if snapshot.was_maximized {
            platform.maximize(handle).map_err(restore_err)?;
        }

        if let Ok(monitors) = platform.monitors()
            && select_monitor(snapshot.bounds, &monitors).is_none()
        {
            tracing::warn!(
                handle = %handle,
                bounds = %snapshot.bounds,
                "restored window is not on any connected monitor"
            );
        }

        tracing::info!(handle = %handle, bounds = %snapshot.bounds, "exited borderless fullscreen");
        Ok(Transition::Exited)
    }

    /// Best-effort undo of a partially applied transformation.
    fn roll_back(
        &self,
        handle: WindowHandle,
        original_styles: Option<(WindowStyle, ExtendedStyle)>,
        placed: Placed,
    ) {
        if let Some((style, extended_style)) = original_styles
            && let Err(err) = self.platform.set_styles(handle, style, extended_style)
        {
            tracing::warn!(handle = %handle, error = %err, "failed to roll back window style");
        }

        if placed.was_maximized && let Err(err) = self.platform.maximize(handle) {
            tracing::warn!(handle = %handle, error = %err, "failed to re-maximize window");
        }

        if placed.was_minimized && let Err(err) = self.platform.minimize(handle) {
            tracing::warn!(handle = %handle, error = %err, "failed to re-minimize window");
        }
    }
}
