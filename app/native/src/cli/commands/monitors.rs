//! Monitor listing.

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::borderless::MonitorInfo;
use crate::cli::output;
use crate::error::NoBordersError;

#[derive(Tabled)]
struct MonitorRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Work Area")]
    work_area: String,
    #[tabled(rename = "Primary")]
    primary: String,
}

impl From<&MonitorInfo> for MonitorRow {
    fn from(monitor: &MonitorInfo) -> Self {
        let full = monitor.full_area;
        let work = monitor.work_area;
        Self {
            index: monitor.index,
            name: output::shorten(monitor.friendly_name(), 24),
            resolution: format!("{}x{}", full.width, full.height),
            position: format!("{}, {}", full.x, full.y),
            work_area: format!("{}x{}", work.width, work.height),
            primary: output::check_mark(monitor.is_primary),
        }
    }
}

/// Renders monitors as a rounded table.
#[must_use]
pub fn monitor_table(monitors: &[MonitorInfo]) -> String {
    Table::new(monitors.iter().map(MonitorRow::from))
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string()
}

/// Prints the monitors as a table or as JSON.
///
/// # Errors
///
/// Returns an error if the monitors cannot be serialized.
pub fn print_monitors(monitors: &[MonitorInfo], json: bool) -> Result<(), NoBordersError> {
    if json {
        output::print_highlighted_json(&serde_json::to_value(monitors)?);
        return Ok(());
    }

    if monitors.is_empty() {
        println!("{}", "No monitors detected.".dimmed());
        return Ok(());
    }

    println!("{}", format!("Monitors ({})", monitors.len()).bold());
    println!("{}", monitor_table(monitors));
    Ok(())
}

/// Lists the connected monitors.
///
/// # Errors
///
/// Returns an error if monitor enumeration fails.
#[cfg(windows)]
pub fn execute(json: bool) -> Result<(), NoBordersError> {
    use crate::platform::{Win32Platform, WindowPlatform};

    let monitors = Win32Platform::new().monitors()?;
    print_monitors(&monitors, json)
}

/// Lists the connected monitors.
///
/// # Errors
///
/// Always returns [`NoBordersError::UnsupportedPlatform`].
#[cfg(not(windows))]
pub fn execute(_json: bool) -> Result<(), NoBordersError> {
    Err(NoBordersError::UnsupportedPlatform("monitors".to_string()))
}
