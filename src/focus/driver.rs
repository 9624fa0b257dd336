//! Ties a scheduler to a session sink.
//!
//! The driver decides which finished intervals are persisted, according to
//! the configured [`PersistPolicy`].

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use super::scheduler::{FocusScheduler, TickOutcome};
use super::session::{Interval, IntervalKind, Plan};
use super::storage::CompletedSessionRecord;
use crate::error::FocusError;

/// Destination for completed intervals.
#[cfg_attr(test, mockall::automock)]
pub trait SessionSink {
    /// Persist one completed record.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the record cannot be written.
    fn record(&self, record: &CompletedSessionRecord) -> Result<(), FocusError>;
}

/// Which intervals get persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Every work interval, as soon as it completes.
    #[default]
    EveryWorkInterval,
    /// Only the plan's final interval at exhaustion, always labeled "work".
    FinalInterval,
}

/// Label the final-interval policy writes regardless of interval kind.
const LEGACY_LABEL: &str = "work";

/// A scheduler plus persistence rules.
#[derive(Debug, Clone, Default)]
pub struct FocusDriver {
    scheduler: FocusScheduler,
    policy: PersistPolicy,
}

impl FocusDriver {
    /// Create an idle driver.
    #[must_use]
    pub fn new(policy: PersistPolicy) -> Self {
        Self {
            scheduler: FocusScheduler::new(),
            policy,
        }
    }

    /// The underlying scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &FocusScheduler {
        &self.scheduler
    }

    /// Start a new plan at `now`.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Configuration` if the work/break cycle is zero.
    pub fn start(
        &mut self,
        total_minutes: u32,
        work_minutes: u32,
        break_minutes: u32,
        now: DateTime<Local>,
    ) -> Result<&Plan, FocusError> {
        self.scheduler.start(total_minutes, work_minutes, break_minutes, now)
    }

    /// Pause the active interval.
    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Duration> {
        self.scheduler.pause(now)
    }

    /// Resume after a pause.
    pub fn resume(&mut self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        self.scheduler.resume(now)
    }

    /// Toggle between paused and running.
    ///
    /// Returns true if the plan is paused afterwards.
    pub fn toggle_pause(&mut self, now: DateTime<Local>) -> bool {
        if self.scheduler.is_paused() {
            self.scheduler.resume(now);
        } else {
            self.scheduler.pause(now);
        }
        self.scheduler.is_paused()
    }

    /// Drop the plan without persisting anything.
    pub fn abort(&mut self) {
        self.scheduler.abort();
    }

    /// Advance the scheduler and persist whatever the policy asks for.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if persisting fails. The scheduler has
    /// already advanced by then.
    pub fn tick(
        &mut self,
        now: DateTime<Local>,
        sink: &dyn SessionSink,
    ) -> Result<TickOutcome, FocusError> {
        let outcome = self.scheduler.tick(now);

        match (&outcome, self.policy) {
            (TickOutcome::Active { completed, .. }, PersistPolicy::EveryWorkInterval)
            | (TickOutcome::Finished { completed, .. }, PersistPolicy::EveryWorkInterval) => {
                persist_work(completed, sink)?;
            }
            (TickOutcome::Finished { last, .. }, PersistPolicy::FinalInterval) => {
                sink.record(&CompletedSessionRecord::from_interval(last, LEGACY_LABEL))?;
            }
            _ => {}
        }

        Ok(outcome)
    }
}

fn persist_work(completed: &[Interval], sink: &dyn SessionSink) -> Result<(), FocusError> {
    for interval in completed.iter().filter(|i| i.kind == IntervalKind::Work) {
        sink.record(&CompletedSessionRecord::from_interval(
            interval,
            interval.kind.label(),
        ))?;
    }
    Ok(())
}
