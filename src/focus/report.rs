//! Daily focus statistics.
//!
//! Wraps the per-day totals from [`FocusStorage::daily_totals`] for display.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::storage::{FocusStorage, TRAILING_WINDOW_DAYS};
use crate::error::FocusError;

/// Focused hours per day over the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Last day of the window
    pub as_of: NaiveDate,
    /// Hours per day; days without sessions are absent
    pub totals: BTreeMap<NaiveDate, f64>,
}

/// One line of the daily breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFocusTime {
    /// Date
    pub date: NaiveDate,
    /// Focused hours
    pub hours: f64,
}

impl DailyStats {
    /// Load stats for the window ending at `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the store cannot be queried.
    pub fn generate(storage: &FocusStorage, as_of: NaiveDate) -> Result<Self, FocusError> {
        let totals = storage.daily_totals(as_of)?;
        Ok(Self { as_of, totals })
    }

    /// First day of the window.
    #[must_use]
    pub fn window_start(&self) -> NaiveDate {
        self.as_of - Duration::days(TRAILING_WINDOW_DAYS - 1)
    }

    /// Hours focused on the as-of date (zero when absent).
    #[must_use]
    pub fn today_hours(&self) -> f64 {
        self.totals.get(&self.as_of).copied().unwrap_or(0.0)
    }

    /// Hours focused across the window.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Days with focus time, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<DailyFocusTime> {
        self.totals
            .iter()
            .map(|(date, hours)| DailyFocusTime {
                date: *date,
                hours: *hours,
            })
            .collect()
    }

    /// Format the stats for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Today: {:.1} hours", self.today_hours()));
        lines.push(String::new());
        lines.push(format!(
            "Last {} days ({} to {}):",
            TRAILING_WINDOW_DAYS,
            self.window_start().format("%m-%d"),
            self.as_of.format("%m-%d")
        ));

        if self.totals.is_empty() {
            lines.push("  No focus sessions recorded.".to_string());
        } else {
            for entry in self.entries() {
                lines.push(format_day(&entry));
            }
            lines.push(format!("  Total: {:.1}h", self.total_hours()));
        }

        lines.join("\n")
    }
}

/// Format one day as `MM-DD: 1.2h`.
#[must_use]
pub fn format_day(entry: &DailyFocusTime) -> String {
    format!("  {}: {:.1}h", entry.date.format("%m-%d"), entry.hours)
}
