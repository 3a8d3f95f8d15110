//! Window selection configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a process that owns several top-level windows is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AmbiguityPolicy {
    /// Pick the foreground window if it belongs to the process, otherwise
    /// the topmost window. This is the default.
    #[default]
    PreferForeground,
    /// Refuse to pick; the request fails.
    Strict,
}

/// Window selection settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionConfig {
    /// Resolution policy for processes with several windows.
    /// - `preferForeground`: foreground window, else topmost. Default.
    /// - `strict`: fail with an ambiguity error.
    pub ambiguity: AmbiguityPolicy,
}
