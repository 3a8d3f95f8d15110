//! `noborders config` subcommands.
//!
//! Both commands honour the global `--config` flag: `init` writes the
//! template there and `path` reports it instead of the search locations.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{ConfigLocation, config_locations, config_paths, custom_config_path};
use crate::error::NoBordersError;

/// Configuration file commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration template with every option documented.
    ///
    /// The file goes to the `--config` path if given, otherwise to the first
    /// search location (see `noborders config path`). All options start
    /// commented out, so the file behaves like the defaults until edited.
    #[command(after_long_help = r#"Examples:
  noborders config init                                 # First search location
  noborders --config "D:\Games\noborders.jsonc" config init
  noborders config init --force                         # Replace an existing file
  noborders config init --stdout > noborders.jsonc"#)]
    Init {
        /// Replace the file if it already exists.
        #[arg(long, short)]
        force: bool,

        /// Print the template instead of writing it.
        #[arg(long, conflicts_with = "force")]
        stdout: bool,
    },

    /// List where the configuration is looked up and which file is used.
    ///
    /// Locations in priority order: `$XDG_CONFIG_HOME/noborders`,
    /// `~/.config/noborders`, the platform config directory
    /// (`%APPDATA%\noborders` on Windows), then `~/.noborders.jsonc` and
    /// `~/.noborders.json`. The first file that exists wins.
    Path {
        /// Print JSON instead of a list.
        #[arg(long, short)]
        json: bool,
    },
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the template cannot be written.
pub fn execute(cmd: &ConfigCommands) -> Result<(), NoBordersError> {
    let custom = custom_config_path().map(PathBuf::as_path);

    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, .. } => {
            let target = init_target(custom).ok_or_else(|| {
                NoBordersError::ConfigError(
                    "no home or config directory; pass --config <PATH>".to_string(),
                )
            })?;
            init_config(&target, *force)
        }
        ConfigCommands::Path { json } => show_paths(&path_entries(custom), *json),
    }
}

/// The file `config init` writes to.
fn init_target(custom: Option<&Path>) -> Option<PathBuf> {
    custom.map(Path::to_path_buf).or_else(|| config_paths().into_iter().next())
}

fn init_config(target: &Path, force: bool) -> Result<(), NoBordersError> {
    if target.exists() && !force {
        return Err(NoBordersError::ConfigError(format!(
            "{} already exists, pass --force to replace it",
            target.display()
        )));
    }

    create_config_file(target).map_err(|err| {
        NoBordersError::ConfigError(format!("cannot write {}: {err}", target.display()))
    })?;

    println!("{} {}", "Created".green().bold(), target.display());
    println!("Options are commented out; uncomment the ones you want to change.");
    println!("Run `noborders schema` for a JSON Schema your editor can validate against.");
    Ok(())
}

/// One configuration location as reported by `config path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathEntry {
    source: &'static str,
    path: PathBuf,
    exists: bool,
    /// The file `noborders run` reads.
    active: bool,
}

fn path_entries(custom: Option<&Path>) -> Vec<PathEntry> {
    match custom {
        Some(path) => {
            let exists = path.exists();
            vec![PathEntry { source: "--config", path: path.to_path_buf(), exists, active: exists }]
        }
        None => mark_active(config_locations()),
    }
}

/// Marks the first existing location as active.
fn mark_active(locations: Vec<ConfigLocation>) -> Vec<PathEntry> {
    let mut found = false;
    locations
        .into_iter()
        .map(|location| {
            let exists = location.path.exists();
            let active = exists && !found;
            found |= exists;
            PathEntry { source: location.source.label(), path: location.path, exists, active }
        })
        .collect()
}

fn show_paths(entries: &[PathEntry], json: bool) -> Result<(), NoBordersError> {
    if json {
        output::print_highlighted_json(&serde_json::to_value(entries)?);
        return Ok(());
    }

    println!("{}", "Configuration search paths (first existing file wins):".bold());
    for (i, entry) in entries.iter().enumerate() {
        let marker = if entry.active {
            "active".green().bold().to_string()
        } else if entry.exists {
            "shadowed".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}. {} {} {marker}",
            i + 1,
            format!("{:<18}", format!("[{}]", entry.source)).dimmed(),
            entry.path.display()
        );
    }

    if !entries.iter().any(|entry| entry.active) {
        println!();
        println!("No configuration file found; noborders runs with the defaults.");
        println!("Run `noborders config init` to create one.");
    }
    Ok(())
}
