//! Focus command implementations.

use chrono::{Local, NaiveDate};
use colored::Colorize;

use super::Context;
use crate::cli::args::{HistoryArgs, OutputFormat, SessionArgs, StatsArgs};
use crate::error::FocusError;
use crate::focus::{DailyStats, FocusDriver, Plan};
use crate::output::{format_history, format_plan, format_stats, to_json};
use crate::tui::{self, SessionOutcome};

/// Run a focus session in the terminal UI.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the store cannot be
/// opened, or the terminal fails.
pub fn start(ctx: &Context, args: &SessionArgs) -> Result<String, FocusError> {
    let settings = ctx.session_settings(args)?;
    let storage = ctx.open_storage()?;

    let mut driver = FocusDriver::new(settings.persist);
    driver.start(
        settings.total_minutes,
        settings.work_minutes,
        settings.break_minutes,
        Local::now(),
    )?;

    let outcome = tui::run(&mut driver, &storage)?;
    let stats = DailyStats::generate(&storage, Local::now().date_naive())?;

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "outcome": outcome,
            "stats": stats,
        })),
        OutputFormat::Pretty => {
            let headline = match outcome {
                SessionOutcome::Finished => "Focus session complete!".green().to_string(),
                SessionOutcome::Aborted => "Focus session aborted.".yellow().to_string(),
            };
            Ok(format!("{headline}\n\n{}", stats.format()))
        }
    }
}

/// Show the schedule a session would follow if started now.
///
/// # Errors
///
/// Returns an error if the settings are invalid.
pub fn plan(ctx: &Context, args: &SessionArgs) -> Result<String, FocusError> {
    let settings = ctx.session_settings(args)?;
    let plan = Plan::build(
        settings.total_minutes,
        settings.work_minutes,
        settings.break_minutes,
    )?;
    format_plan(&plan, ctx.format)
}

/// Show daily focus totals for the trailing window.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn stats(ctx: &Context, args: &StatsArgs) -> Result<String, FocusError> {
    let as_of: NaiveDate = args.date.unwrap_or_else(|| Local::now().date_naive());
    let storage = ctx.open_storage()?;
    let stats = DailyStats::generate(&storage, as_of)?;
    format_stats(&stats, ctx.format)
}

/// List stored sessions.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn history(ctx: &Context, args: &HistoryArgs) -> Result<String, FocusError> {
    let storage = ctx.open_storage()?;
    let records = storage.recent(args.limit)?;
    format_history(&records, ctx.format)
}
