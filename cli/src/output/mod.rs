//! CLI-specific output implementations
//!
//! This module contains the terminal rendition of the router's chrome and
//! the formatting of navigation outcomes.

pub mod terminal;

pub use terminal::TerminalShell;

use colored::Colorize;
use nivoxar_core::NavigationOutcome;

/// One-line summary of how a navigation ended
pub fn describe_outcome(outcome: &NavigationOutcome) -> String {
    match outcome {
        NavigationOutcome::Completed { path } => format!("→ {}", path).green().to_string(),
        NavigationOutcome::Redirected { requested, path } => {
            format!("→ {} (no route for {})", path, requested)
                .yellow()
                .to_string()
        }
        NavigationOutcome::Failed { path, message } => {
            format!("✗ {}: {}", path, message).red().to_string()
        }
        NavigationOutcome::Cancelled { path } => {
            format!("· navigation to {} cancelled", path).dimmed().to_string()
        }
        NavigationOutcome::Busy { path } => {
            format!("· navigation to {} dropped, router busy", path)
                .dimmed()
                .to_string()
        }
    }
}
