use colored::Colorize;

use crate::focus::{
    format_duration, CompletedSessionRecord, DailyStats, IntervalKind, Plan,
};

/// Format a plan as a schedule table
pub fn format_plan_pretty(plan: &Plan) -> String {
    if plan.is_empty() {
        return "Plan (0 intervals)\n  Nothing to schedule".to_string();
    }

    let mut output = format!(
        "Plan ({} intervals, {})\n",
        plan.len(),
        format_duration(plan.total_duration())
    );
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for (i, interval) in plan.intervals().iter().enumerate() {
        let kind = match interval.kind {
            IntervalKind::Work => interval.kind.display_name().green(),
            IntervalKind::Break => interval.kind.display_name().cyan(),
        };
        output.push_str(&format!(
            "{:>3}. {}-{}  {:<5}  {}m\n",
            i + 1,
            interval.start.format("%H:%M"),
            interval.end.format("%H:%M"),
            kind,
            interval.duration().num_minutes()
        ));
    }

    output
}

/// Format daily stats with today's total and the per-day list
pub fn format_stats_pretty(stats: &DailyStats) -> String {
    let mut output = format!("{}\n", "Focus Stats".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&stats.format());
    output
}

/// Format stored sessions as a table
pub fn format_history_pretty(records: &[CompletedSessionRecord]) -> String {
    if records.is_empty() {
        return "No focus sessions found.\n\nStart one with: focustimer start".to_string();
    }

    let mut output = format!("{} ({} sessions)\n", "Focus Session History".bold(), records.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "{:<12} {:<13} {:>8}  {}\n",
        "Date", "Time", "Duration", "Type"
    ));

    for record in records {
        output.push_str(&format!(
            "{:<12} {:<13} {:>7}m  {}\n",
            record.start.format("%Y-%m-%d"),
            format!("{}-{}", record.start.format("%H:%M"), record.end.format("%H:%M")),
            record.duration().num_minutes(),
            record.session_type.dimmed()
        ));
    }

    output
}
