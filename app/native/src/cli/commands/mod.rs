//! CLI command definitions using Clap.
//!
//! - `config_cmd` - configuration file commands
//! - `monitors` - monitor listing

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::daemon::{self, DaemonOptions};
use crate::error::NoBordersError;
use crate::schema;

pub mod config_cmd;
pub mod monitors;

pub use config_cmd::ConfigCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `NoBorders` - toggle any window between windowed and borderless fullscreen.
#[derive(Parser, Debug)]
#[command(name = "noborders")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Start the hotkey daemon.
    ///
    /// Registers the configured hotkeys and runs until the quit hotkey or
    /// Ctrl+C. Every borderless window is restored on exit.
    #[command(after_long_help = r"Examples:
  noborders run                        # Toggle the focused window with the hotkey
  noborders run --pid 4242             # Also make process 4242 borderless now
  noborders run --pid 4242 --monitor 1 # ... on the second monitor")]
    Run {
        /// Process to make borderless at startup. Can be repeated.
        #[arg(long = "pid", value_name = "PID")]
        pids: Vec<u32>,

        /// Monitor index for the startup processes (see `noborders monitors`).
        #[arg(long, value_name = "INDEX", requires = "pids")]
        monitor: Option<usize>,
    },

    /// List connected monitors.
    ///
    /// Index 0 is always the primary monitor.
    Monitors {
        /// Print JSON instead of a table.
        #[arg(long, short)]
        json: bool,
    },

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   noborders completions --shell powershell >> $PROFILE
    ///   eval "$(noborders completions --shell bash)"
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub const fn config_path(&self) -> Option<&PathBuf> { self.config.as_ref() }

    /// Returns `true` if the command reads the configuration file.
    #[must_use]
    pub const fn uses_config(&self) -> bool {
        matches!(self.command, Commands::Run { .. } | Commands::Monitors { .. })
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), NoBordersError> {
        match &self.command {
            Commands::Run { pids, monitor } => {
                daemon::run(&DaemonOptions { pids: pids.clone(), monitor: *monitor })
            }
            Commands::Monitors { json } => monitors::execute(*json),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "noborders", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_run_with_pids() {
        let cli =
            Cli::try_parse_from(["noborders", "run", "--pid", "10", "--pid", "20", "--monitor", "1"])
                .unwrap();
        match cli.command {
            Commands::Run { pids, monitor } => {
                assert_eq!(pids, vec![10, 20]);
                assert_eq!(monitor, Some(1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_plain_run() {
        let cli = Cli::try_parse_from(["noborders", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { ref pids, monitor: None } if pids.is_empty()));
    }

    #[test]
    fn test_monitor_requires_pid() {
        assert!(Cli::try_parse_from(["noborders", "run", "--monitor", "1"]).is_err());
    }

    #[test]
    fn test_cli_parses_monitors_json() {
        let cli = Cli::try_parse_from(["noborders", "monitors", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Monitors { json: true }));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["noborders", "schema", "--config", "/tmp/nb.jsonc"]).unwrap();
        assert_eq!(cli.config_path(), Some(&PathBuf::from("/tmp/nb.jsonc")));
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_config_path() {
        let cli = Cli::try_parse_from(["noborders", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path { json: false })));
        assert!(!cli.uses_config());

        let cli = Cli::try_parse_from(["noborders", "config", "path", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path { json: true })));
    }

    #[test]
    fn test_config_init_writes_to_global_config_path() {
        let cli =
            Cli::try_parse_from(["noborders", "--config", "nb.jsonc", "config", "init", "--force"])
                .unwrap();
        assert_eq!(cli.config_path(), Some(&PathBuf::from("nb.jsonc")));
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true, stdout: false })
        ));

        let conflicting = ["noborders", "config", "init", "--stdout", "--force"];
        assert!(Cli::try_parse_from(conflicting).is_err());
        assert!(Cli::try_parse_from(["noborders", "config", "init", "--path", "x"]).is_err());
    }

    #[test]
    fn test_run_uses_config() {
        assert!(Cli::try_parse_from(["noborders", "run"]).unwrap().uses_config());
        assert!(!Cli::try_parse_from(["noborders", "schema"]).unwrap().uses_config());
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["noborders", "completions", "--shell", "powershell"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::PowerShell }));
    }

    #[test]
    fn test_cli_rejects_invalid_pid() {
        assert!(Cli::try_parse_from(["noborders", "run", "--pid", "abc"]).is_err());
    }
}
