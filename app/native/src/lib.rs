//! `NoBorders` - toggle any window between windowed and borderless fullscreen.
//!
//! The library holds the window engine ([`borderless`]), the platform
//! backends it drives ([`platform`]) and the hotkey daemon and CLI built on
//! top of them.

pub mod borderless;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod hotkey;
pub mod logging;
pub mod platform;
pub mod schema;
