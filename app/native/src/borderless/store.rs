//! Snapshot storage keyed by window handle.
//!
//! Presence of a snapshot is what makes a window borderless; there is no
//! separate state flag. Entries are never evicted implicitly.

use std::collections::HashMap;

use super::error::{BorderlessError, BorderlessResult};
use super::types::{ToggleState, WindowHandle, WindowStyleSnapshot};

/// Original window state for every borderless window.
#[derive(Debug, Default)]
pub struct StateStore {
    snapshots: HashMap<WindowHandle, WindowStyleSnapshot>,
}

impl StateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Records a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BorderlessError::AlreadyCaptured`] if the handle already has
    /// one; the existing snapshot is left untouched.
    pub fn capture(&mut self, snapshot: WindowStyleSnapshot) -> BorderlessResult<()> {
        if self.snapshots.contains_key(&snapshot.handle) {
            return Err(BorderlessError::AlreadyCaptured(snapshot.handle));
        }
        self.snapshots.insert(snapshot.handle, snapshot);
        Ok(())
    }

    /// Removes and returns the snapshot for `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`BorderlessError::NotCaptured`] if there is none.
    pub fn take(&mut self, handle: WindowHandle) -> BorderlessResult<WindowStyleSnapshot> {
        self.snapshots.remove(&handle).ok_or(BorderlessError::NotCaptured(handle))
    }

    #[must_use]
    pub fn has(&self, handle: WindowHandle) -> bool { self.snapshots.contains_key(&handle) }

    /// Returns the snapshot without removing it.
    #[must_use]
    pub fn get(&self, handle: WindowHandle) -> Option<&WindowStyleSnapshot> {
        self.snapshots.get(&handle)
    }

    /// Drops a stale snapshot. Returns `true` if one was present.
    pub fn discard(&mut self, handle: WindowHandle) -> bool {
        self.snapshots.remove(&handle).is_some()
    }

    #[must_use]
    pub fn state_of(&self, handle: WindowHandle) -> ToggleState {
        if self.has(handle) { ToggleState::Borderless } else { ToggleState::Normal }
    }

    /// All captured handles, sorted.
    #[must_use]
    pub fn handles(&self) -> Vec<WindowHandle> {
        let mut handles: Vec<_> = self.snapshots.keys().copied().collect();
        handles.sort_unstable();
        handles
    }

    #[must_use]
    pub fn len(&self) -> usize { self.snapshots.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.snapshots.is_empty() }
}
