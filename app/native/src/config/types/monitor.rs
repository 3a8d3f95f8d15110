//! Monitor placement configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do when a window does not overlap any monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MonitorFallback {
    /// Use the monitor of the window's normal (restored) placement. Default.
    #[default]
    LastKnownBounds,
    /// Use the primary monitor.
    Primary,
    /// Fail the request.
    Fail,
}

/// Monitor placement settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Fallback when the window is minimized or off-screen.
    /// - `lastKnownBounds`: monitor of the restored placement. Default.
    /// - `primary`: the primary monitor.
    /// - `fail`: report the window as not visible.
    pub fallback: MonitorFallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fallback() {
        for (json, expected) in [
            (r#"{"fallback": "lastKnownBounds"}"#, MonitorFallback::LastKnownBounds),
            (r#"{"fallback": "primary"}"#, MonitorFallback::Primary),
            (r#"{"fallback": "fail"}"#, MonitorFallback::Fail),
            ("{}", MonitorFallback::LastKnownBounds),
        ] {
            let config: MonitorConfig = serde_json::from_str(json).unwrap();
            assert_eq!(config.fallback, expected);
        }
    }
}
