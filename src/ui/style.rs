//! Terminal styling for CLI output.

use console::style;
use std::fmt::Display;

/// Green check line.
pub fn ok<D: Display>(text: D) -> String {
    format!("  {} {text}", style("✓").green().bold())
}

/// Red cross line.
pub fn missing<D: Display>(text: D) -> String {
    format!("  {} {text}", style("✗").red().bold())
}

/// Yellow bang line for timeouts and soft failures.
pub fn warn<D: Display>(text: D) -> String {
    format!("  {} {text}", style("!").yellow().bold())
}

pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Shell commands in hints.
pub fn command<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// `ok` or `missing` depending on `present`.
pub fn status<D: Display>(present: bool, text: D) -> String {
    if present { ok(text) } else { missing(text) }
}
