//! Application state for the focus TUI.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::error::FocusError;
use crate::focus::{
    DailyStats, FocusDriver, FocusStorage, Interval, IntervalKind, Plan, TickOutcome,
};

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    /// The plan ran to its end.
    Finished,
    /// The user aborted or quit early.
    Aborted,
}

/// Application state.
pub struct App<'a> {
    driver: &'a mut FocusDriver,
    storage: &'a FocusStorage,
    /// Copy of the plan for display; survives the scheduler dropping it.
    plan: Plan,
    /// What the last tick observed.
    pub last_tick: TickOutcome,
    /// Daily totals shown in the stats panel.
    pub stats: DailyStats,
    /// Status message to display.
    pub status: Option<String>,
    /// Set once the session has ended.
    pub outcome: Option<SessionOutcome>,
}

impl<'a> App<'a> {
    /// Create a new app around a started driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the daily stats cannot be loaded.
    pub fn new(driver: &'a mut FocusDriver, storage: &'a FocusStorage) -> Result<Self, FocusError> {
        let stats = DailyStats::generate(storage, Local::now().date_naive())?;
        let plan = driver.scheduler().plan().clone();

        Ok(Self {
            driver,
            storage,
            plan,
            last_tick: TickOutcome::Idle,
            stats,
            status: Some("p:pause | a:abort | q:quit".to_string()),
            outcome: None,
        })
    }

    /// The plan being shown.
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// The interval to highlight, if any.
    pub fn current_interval(&self) -> Option<&Interval> {
        match &self.last_tick {
            TickOutcome::Active { interval, .. } | TickOutcome::Paused { interval, .. } => {
                Some(interval)
            }
            TickOutcome::Finished { .. } | TickOutcome::Idle => None,
        }
    }

    /// Countdown for the current interval.
    pub fn remaining(&self) -> Duration {
        match &self.last_tick {
            TickOutcome::Active { remaining, .. } | TickOutcome::Paused { remaining, .. } => {
                *remaining
            }
            TickOutcome::Finished { .. } | TickOutcome::Idle => Duration::zero(),
        }
    }

    /// Whether the countdown is frozen.
    pub fn is_paused(&self) -> bool {
        matches!(self.last_tick, TickOutcome::Paused { .. })
    }

    /// Poll the driver.
    ///
    /// Storage failures are shown in the status bar; the timer keeps going.
    /// The stats panel reloads whenever a work interval completes.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.outcome.is_some() {
            return;
        }

        match self.driver.tick(now, self.storage) {
            Ok(outcome) => {
                if self.driver.scheduler().is_active() {
                    self.plan = self.driver.scheduler().plan().clone();
                }
                let finished = matches!(outcome, TickOutcome::Finished { .. });
                let work_done = match &outcome {
                    TickOutcome::Active { completed, .. } => {
                        completed.iter().any(|i| i.kind == IntervalKind::Work)
                    }
                    _ => false,
                };
                self.last_tick = outcome;
                if finished {
                    self.finish(now);
                } else if work_done {
                    self.refresh_stats(now);
                }
            }
            Err(e) => {
                log::error!("failed to record session: {e}");
                self.status = Some(format!("Failed to save session: {e}"));
                if !self.driver.scheduler().is_active() {
                    self.last_tick = TickOutcome::Idle;
                    self.outcome = Some(SessionOutcome::Finished);
                    self.refresh_stats(now);
                }
            }
        }
    }

    fn finish(&mut self, now: DateTime<Local>) {
        self.outcome = Some(SessionOutcome::Finished);
        self.status = Some("Session complete! Press q to exit".to_string());
        self.refresh_stats(now);
    }

    /// Reload the daily totals.
    pub fn refresh_stats(&mut self, now: DateTime<Local>) {
        match DailyStats::generate(self.storage, now.date_naive()) {
            Ok(stats) => self.stats = stats,
            Err(e) => self.status = Some(format!("Failed to load stats: {e}")),
        }
    }

    /// Pause or resume.
    pub fn toggle_pause(&mut self, now: DateTime<Local>) {
        if self.outcome.is_some() {
            return;
        }
        let paused = self.driver.toggle_pause(now);
        self.status = Some(if paused {
            "Paused. Press p to resume".to_string()
        } else {
            "p:pause | a:abort | q:quit".to_string()
        });
        self.tick(now);
    }

    /// Abort the session without saving the in-progress interval.
    pub fn abort(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.driver.abort();
        self.last_tick = TickOutcome::Idle;
        self.outcome = Some(SessionOutcome::Aborted);
        self.status = Some("Session aborted. Press q to exit".to_string());
    }
}
