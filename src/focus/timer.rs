//! Countdown formatting helpers.

use chrono::Duration;

/// Format a duration as MM:SS, rounding partial seconds up.
///
/// Minutes are not wrapped into hours, so 90 minutes prints as `90:00`.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let millis = d.num_milliseconds().max(0);
    let total_seconds = (millis + 999) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Fraction of `total` already elapsed given `remaining`, in 0.0 - 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress(total: Duration, remaining: Duration) -> f64 {
    let total_ms = total.num_milliseconds();
    if total_ms <= 0 {
        return 1.0;
    }
    let done = (total_ms - remaining.num_milliseconds()) as f64 / total_ms as f64;
    done.clamp(0.0, 1.0)
}
