//! Borderless fullscreen transformation.
//!
//! This module toggles top-level windows between their normal windowed
//! presentation and a borderless presentation covering one full monitor,
//! recording enough state to reverse the change exactly.
//!
//! # Architecture
//!
//! - [`resolver`] - maps a [`Selector`] to a window handle
//! - [`geometry`] - picks the monitor a window occupies
//! - [`store`] - holds the original state of every borderless window
//! - [`engine`] - applies and reverts the transformation
//! - [`orchestrator`] - the `toggle(selector)` entry point and teardown
//! - [`reapply`] - processes whose new windows are made borderless

pub mod engine;
pub mod error;
pub mod geometry;
pub mod orchestrator;
pub mod reapply;
pub mod resolver;
pub mod store;
pub mod style;
pub mod types;

pub use engine::{Engine, RestoreReport};
pub use error::{BorderlessError, BorderlessResult, PlatformError, ToggleError};
pub use geometry::{Placement, monitor_for, select_monitor, target_monitor};
pub use orchestrator::{ReconcileReport, ToggleOptions, ToggleResult, Toggler, is_benign};
pub use reapply::{ReapplyTracker, TrackedProcess};
pub use resolver::resolve_target;
pub use store::StateStore;
pub use style::{ExtendedStyle, WindowStyle};
pub use types::{
    MonitorInfo, Rect, Selector, ToggleState, Transition, WindowHandle, WindowStyleSnapshot,
};
