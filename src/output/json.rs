//! JSON output formatting for focustimer.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusError;
use crate::focus::{CompletedSessionRecord, DailyStats, Plan};

/// Format a plan as JSON
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_plan_json(plan: &Plan) -> Result<String, FocusError> {
    let items: Vec<_> = plan
        .intervals()
        .iter()
        .map(|i| {
            json!({
                "kind": i.kind,
                "start": i.start.to_rfc3339(),
                "end": i.end.to_rfc3339(),
                "minutes": i.duration().num_minutes(),
            })
        })
        .collect();

    let output = json!({
        "count": items.len(),
        "total_minutes": plan.total_duration().num_minutes(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format daily stats as JSON
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_stats_json(stats: &DailyStats) -> Result<String, FocusError> {
    let output = json!({
        "as_of": stats.as_of,
        "window_start": stats.window_start(),
        "today_hours": stats.today_hours(),
        "total_hours": stats.total_hours(),
        "days": stats.totals
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format stored sessions as JSON
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn format_history_json(records: &[CompletedSessionRecord]) -> Result<String, FocusError> {
    let output = json!({
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `FocusError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(value)?)
}
