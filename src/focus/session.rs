//! Work/break intervals and the plan that sequences them.
//!
//! A [`Plan`] partitions a total duration into alternating work and break
//! intervals anchored to local wall-clock time.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use crate::error::FocusError;

/// Kind of interval in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    /// Focused work
    Work,
    /// Rest between work intervals
    Break,
}

impl IntervalKind {
    /// Label stored alongside persisted records.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Break => "Break",
        }
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A contiguous span of time tagged work or break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Work or break
    pub kind: IntervalKind,
    /// When the interval starts
    pub start: DateTime<Local>,
    /// When the interval ends (always after `start`)
    pub end: DateTime<Local>,
}

impl Interval {
    fn new(kind: IntervalKind, start: DateTime<Local>, minutes: u32) -> Self {
        Self {
            kind,
            start,
            end: start + Duration::minutes(i64::from(minutes)),
        }
    }

    /// Whether `now` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, now: DateTime<Local>) -> bool {
        self.start <= now && now < self.end
    }

    /// Length of the interval.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Time left until `end`, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        let left = self.end.signed_duration_since(now);
        if left < Duration::zero() {
            Duration::zero()
        } else {
            left
        }
    }
}

/// Ordered sequence of intervals generated for one focus session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    intervals: Vec<Interval>,
}

impl Plan {
    /// Build a plan starting now.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Configuration` if `work_minutes + break_minutes` is zero.
    pub fn build(total_minutes: u32, work_minutes: u32, break_minutes: u32) -> Result<Self, FocusError> {
        Self::build_at(total_minutes, work_minutes, break_minutes, Local::now())
    }

    /// Build a plan anchored at `start`.
    ///
    /// Emits `total / cycle` work/break pairs followed by a work interval for
    /// any remainder. A zero remainder emits nothing extra.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Configuration` if `work_minutes + break_minutes` is zero.
    pub fn build_at(
        total_minutes: u32,
        work_minutes: u32,
        break_minutes: u32,
        start: DateTime<Local>,
    ) -> Result<Self, FocusError> {
        let cycle = work_minutes
            .checked_add(break_minutes)
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                FocusError::Configuration(format!(
                    "invalid work/break cycle: {work_minutes}m work + {break_minutes}m break"
                ))
            })?;

        let full_cycles = total_minutes / cycle;
        let remainder = total_minutes % cycle;

        let mut intervals = Vec::with_capacity(full_cycles as usize * 2 + 1);
        let mut cursor = start;

        for _ in 0..full_cycles {
            for (kind, minutes) in [
                (IntervalKind::Work, work_minutes),
                (IntervalKind::Break, break_minutes),
            ] {
                // A zero-length half of the cycle would break `end > start`.
                if minutes == 0 {
                    continue;
                }
                let interval = Interval::new(kind, cursor, minutes);
                cursor = interval.end;
                intervals.push(interval);
            }
        }

        if remainder > 0 {
            intervals.push(Interval::new(IntervalKind::Work, cursor, remainder));
        }

        Ok(Self { intervals })
    }

    /// All intervals in order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the plan has no intervals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Last interval in the plan.
    #[must_use]
    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    /// Interval at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Position of the first interval containing `now`.
    #[must_use]
    pub fn active_index(&self, now: DateTime<Local>) -> Option<usize> {
        self.intervals.iter().position(|i| i.contains(now))
    }

    /// The interval active at `now`, if any.
    #[must_use]
    pub fn active_interval(&self, now: DateTime<Local>) -> Option<&Interval> {
        self.active_index(now).and_then(|i| self.intervals.get(i))
    }

    /// Sum of all interval lengths.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.intervals
            .iter()
            .fold(Duration::zero(), |acc, i| acc + i.duration())
    }

    /// Rewrite the end of the interval at `index`.
    ///
    /// Only the scheduler calls this, on resume.
    pub(crate) fn set_end(&mut self, index: usize, end: DateTime<Local>) {
        if let Some(interval) = self.intervals.get_mut(index) {
            interval.end = end;
        }
    }
}
