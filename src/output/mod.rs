//! Output formatting for focustimer.
//!
//! Formatters for plans, daily stats and session history.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::focus::{CompletedSessionRecord, DailyStats, Plan};

pub use json::*;
pub use pretty::*;

/// Format a plan based on output format
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_plan(plan: &Plan, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(plan)),
        OutputFormat::Json => format_plan_json(plan),
    }
}

/// Format daily stats based on output format
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_stats(stats: &DailyStats, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}

/// Format stored sessions based on output format
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_history(
    records: &[CompletedSessionRecord],
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(records)),
        OutputFormat::Json => format_history_json(records),
    }
}
