//! Processes whose new windows are made borderless automatically.
//!
//! Games and launchers often destroy their window and create a new one (for
//! example when switching video modes). Once a process has had a window made
//! borderless, later top-level windows of that process get the same
//! treatment, until the user reverts it or the process exits.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::types::WindowHandle;

/// A process that has been made borderless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedProcess {
    pub pid: u32,
    /// Executable name when tracking started. A different name for the same
    /// pid means the id was reused by another program.
    pub name: String,
    /// Explicit monitor requested for the process, if any.
    pub monitor: Option<usize>,
    /// Windows already seen for this process; only windows outside this set
    /// are considered new.
    #[serde(skip)]
    known_windows: BTreeSet<WindowHandle>,
}

impl TrackedProcess {
    /// Returns `true` if the window has not been seen before.
    #[must_use]
    pub fn is_new_window(&self, handle: WindowHandle) -> bool {
        !self.known_windows.contains(&handle)
    }
}

/// Set of processes whose new windows are made borderless.
#[derive(Debug, Default)]
pub struct ReapplyTracker {
    processes: BTreeMap<u32, TrackedProcess>,
}

impl ReapplyTracker {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Starts tracking a process, or updates its name and monitor.
    ///
    /// `existing` are the windows the process has right now; they are never
    /// considered new. A `None` monitor keeps the one already recorded for
    /// the process unless its pid was reused by another program.
    pub fn track(
        &mut self,
        pid: u32,
        name: impl Into<String>,
        monitor: Option<usize>,
        existing: impl IntoIterator<Item = WindowHandle>,
    ) {
        let name = name.into();
        let process = self.processes.entry(pid).or_insert_with(|| TrackedProcess {
            pid,
            name: name.clone(),
            monitor,
            known_windows: BTreeSet::new(),
        });

        if process.name == name {
            process.monitor = monitor.or(process.monitor);
        } else {
            process.known_windows.clear();
            process.monitor = monitor;
        }
        process.name = name;
        process.known_windows.extend(existing);
    }

    /// Marks a window as seen so it is not considered new again.
    pub fn mark_known(&mut self, pid: u32, handle: WindowHandle) {
        if let Some(process) = self.processes.get_mut(&pid) {
            process.known_windows.insert(handle);
        }
    }

    /// Stops tracking a process. Returns `true` if it was tracked.
    pub fn forget(&mut self, pid: u32) -> bool { self.processes.remove(&pid).is_some() }

    #[must_use]
    pub fn get(&self, pid: u32) -> Option<&TrackedProcess> { self.processes.get(&pid) }

    #[must_use]
    pub fn is_tracked(&self, pid: u32) -> bool { self.processes.contains_key(&pid) }

    /// Tracked processes ordered by pid.
    pub fn processes(&self) -> impl Iterator<Item = &TrackedProcess> { self.processes.values() }

    #[must_use]
    pub fn len(&self) -> usize { self.processes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.processes.is_empty() }

    pub fn clear(&mut self) { self.processes.clear(); }
}
