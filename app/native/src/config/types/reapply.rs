//! Automatic re-application configuration.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default watcher interval in milliseconds.
const DEFAULT_INTERVAL_MS: u64 = 3000;

/// Shortest interval the watcher will honor.
const MIN_INTERVAL_MS: u64 = 250;

/// Configuration for re-applying borderless to new windows.
///
/// Once a window is made borderless, new top-level windows of the same
/// process are made borderless too, as long as the process keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ReapplyConfig {
    /// Whether re-application is enabled.
    /// Default: true
    pub enabled: bool,

    /// How often the watcher looks for new and closed windows, in milliseconds.
    /// Values below 250 are raised to 250.
    /// Default: 3000
    pub interval_ms: u64,
}

impl Default for ReapplyConfig {
    fn default() -> Self { Self { enabled: true, interval_ms: DEFAULT_INTERVAL_MS } }
}

impl ReapplyConfig {
    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled }

    /// The watcher interval, clamped to the minimum.
    #[must_use]
    pub fn interval(&self) -> Duration { Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS)) }
}
