//! CLI module for `NoBorders`.
//!
//! Parses the command line, loads the configuration and logging for commands
//! that need them, then dispatches to the command.

mod commands;
mod output;

use clap::Parser;
pub use commands::{Cli, Commands};

use crate::error::NoBordersError;
use crate::{config, logging};

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), NoBordersError> {
    let cli = Cli::parse();

    if let Some(path) = cli.config_path() {
        // `config init` may target a file that does not exist yet
        if cli.uses_config() && !path.exists() {
            return Err(NoBordersError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        config::set_custom_config_path(path.clone());
    }

    // `config init` must not see the template that loading would create
    let log_level = if cli.uses_config() {
        config::init().log_level.as_deref()
    } else {
        None
    };
    logging::init(log_level);
    config::report_load_error();

    cli.execute()
}
