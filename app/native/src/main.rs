#![allow(clippy::multiple_crate_versions)]

//! `noborders` binary.
//!
//! - `noborders run` starts the hotkey daemon
//! - the other subcommands are one-shot CLI commands

fn main() {
    if let Err(err) = noborders_lib::cli::run() {
        eprintln!("noborders: {err}");
        std::process::exit(1);
    }
}
