//! Owned focus plan with start, pause, resume and abort.
//!
//! The scheduler is polled once per tick with the current instant. It never
//! reads the clock itself, so every transition can be replayed in tests.

use chrono::{DateTime, Duration, Local};
use log::{debug, info};

use super::session::{Interval, Plan};
use crate::error::FocusError;

/// State of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No plan loaded
    Idle,
    /// Plan is running against the wall clock
    Running,
    /// Active interval is frozen with this much time left
    Paused {
        /// Time left in the active interval when paused
        remaining: Duration,
    },
}

impl std::fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused { .. } => write!(f, "Paused"),
        }
    }
}

/// What a single tick observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No plan is loaded.
    Idle,
    /// The plan is paused.
    Paused {
        /// The interval that was active when pausing
        interval: Interval,
        /// Time it still has left
        remaining: Duration,
    },
    /// An interval is active.
    Active {
        /// The active interval
        interval: Interval,
        /// Time until it ends
        remaining: Duration,
        /// Intervals that ended since the previous tick
        completed: Vec<Interval>,
    },
    /// The plan ran out; the scheduler is idle again.
    Finished {
        /// Final interval of the plan
        last: Interval,
        /// Intervals that ended since the previous tick
        completed: Vec<Interval>,
    },
}

/// Owns the in-flight plan and its pause state.
#[derive(Debug, Clone)]
pub struct FocusScheduler {
    plan: Plan,
    state: SchedulerState,
    /// Intervals before this index have been settled by a tick.
    next_unreported: usize,
    /// Latest end among settled intervals.
    covered_until: Option<DateTime<Local>>,
    /// Index of the interval frozen by `pause`.
    paused_index: Option<usize>,
}

impl Default for FocusScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plan: Plan::default(),
            state: SchedulerState::Idle,
            next_unreported: 0,
            covered_until: None,
            paused_index: None,
        }
    }

    /// Replace any existing plan with a new one anchored at `now`.
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
        let plan = Plan::build_at(total_minutes, work_minutes, break_minutes, now)?;
        info!(
            "starting focus plan: {total_minutes}m total, {work_minutes}m work, {break_minutes}m break, {} intervals",
            plan.len()
        );

        self.plan = plan;
        self.state = if self.plan.is_empty() {
            SchedulerState::Idle
        } else {
            SchedulerState::Running
        };
        self.next_unreported = 0;
        self.covered_until = None;
        self.paused_index = None;
        Ok(&self.plan)
    }

    /// The current plan (empty when idle).
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Check if the scheduler is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.state, SchedulerState::Paused { .. })
    }

    /// Check if a plan is loaded.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, SchedulerState::Idle)
    }

    /// The interval active at `now`, or the frozen one while paused.
    #[must_use]
    pub fn active_interval(&self, now: DateTime<Local>) -> Option<&Interval> {
        match self.state {
            SchedulerState::Idle => None,
            SchedulerState::Paused { .. } => self.paused_index.and_then(|i| self.plan.get(i)),
            SchedulerState::Running => self.plan.active_interval(now),
        }
    }

    /// Advance to `now`.
    ///
    /// Calling this twice with the same instant reports the same active
    /// interval; completed intervals are only reported once. Every interval
    /// that ended since the last tick is reported, however long the gap,
    /// except intervals swallowed whole by a resumed interval's new end.
    pub fn tick(&mut self, now: DateTime<Local>) -> TickOutcome {
        match self.state {
            SchedulerState::Idle => TickOutcome::Idle,
            SchedulerState::Paused { remaining } => {
                match self.paused_index.and_then(|i| self.plan.get(i)) {
                    Some(interval) => TickOutcome::Paused {
                        interval: interval.clone(),
                        remaining,
                    },
                    None => TickOutcome::Idle,
                }
            }
            SchedulerState::Running => self.tick_running(now),
        }
    }

    fn tick_running(&mut self, now: DateTime<Local>) -> TickOutcome {
        let active = self.plan.active_index(now);
        let started = self
            .plan
            .intervals()
            .first()
            .is_some_and(|first| now >= first.start);

        let settled = match active {
            Some(index) => index,
            None if started => self.plan.len(),
            None => self.next_unreported,
        };
        let completed = self.settle_until(settled);

        if let Some(interval) = active.and_then(|i| self.plan.get(i)) {
            return TickOutcome::Active {
                interval: interval.clone(),
                remaining: interval.remaining(now),
                completed,
            };
        }

        if !started {
            return TickOutcome::Idle;
        }

        let Some(last) = self.plan.last().cloned() else {
            self.reset();
            return TickOutcome::Idle;
        };
        info!("focus plan finished at {}", last.end.format("%H:%M:%S"));
        self.reset();
        TickOutcome::Finished { last, completed }
    }

    /// Settle intervals up to `upto` (exclusive), returning the ones that
    /// were active for some instant.
    ///
    /// The union of earlier intervals is contiguous, so an interval was
    /// active at some point exactly when it ends after all of them.
    fn settle_until(&mut self, upto: usize) -> Vec<Interval> {
        let mut completed = Vec::new();

        while self.next_unreported < upto {
            let index = self.next_unreported;
            self.next_unreported += 1;

            let Some(interval) = self.plan.get(index).cloned() else {
                break;
            };
            if self.covered_until.is_some_and(|covered| interval.end <= covered) {
                debug!("interval {index} ({}) was covered by a resumed interval", interval.kind);
                continue;
            }

            debug!("interval {index} ({}) completed", interval.kind);
            self.covered_until = Some(interval.end);
            completed.push(interval);
        }

        completed
    }

    /// Freeze the active interval.
    ///
    /// Returns the captured remaining time, or `None` if nothing is active
    /// or the scheduler is already paused.
    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Duration> {
        if self.state != SchedulerState::Running {
            return None;
        }
        let index = self.plan.active_index(now)?;
        let remaining = self.plan.get(index)?.remaining(now);

        info!("paused interval {index} with {}s left", remaining.num_seconds());
        self.state = SchedulerState::Paused { remaining };
        self.paused_index = Some(index);
        Some(remaining)
    }

    /// Resume a paused plan.
    ///
    /// The frozen interval's end becomes `now + remaining`. Other intervals
    /// keep their timestamps. Returns the new end, or `None` if not paused.
    pub fn resume(&mut self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let SchedulerState::Paused { remaining } = self.state else {
            return None;
        };
        let index = self.paused_index.take()?;
        let new_end = now + remaining;

        self.plan.set_end(index, new_end);
        self.state = SchedulerState::Running;
        info!("resumed interval {index}, now ends at {}", new_end.format("%H:%M:%S"));
        Some(new_end)
    }

    /// Discard the plan and any pause state.
    pub fn abort(&mut self) {
        if self.is_active() {
            info!("aborting focus plan with {} intervals", self.plan.len());
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.plan = Plan::default();
        self.state = SchedulerState::Idle;
        self.next_unreported = 0;
        self.covered_until = None;
        self.paused_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::session::IntervalKind;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn at(minutes: i64) -> DateTime<Local> {
        anchor() + Duration::minutes(minutes)
    }

    fn started(total: u32) -> FocusScheduler {
        let mut scheduler = FocusScheduler::new();
        scheduler.start(total, 25, 5, anchor()).unwrap();
        scheduler
    }

    #[test]
    fn test_new_is_idle() {
        let mut scheduler = FocusScheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.tick(anchor()), TickOutcome::Idle);
        assert!(scheduler.active_interval(anchor()).is_none());
    }

    #[test]
    fn test_start_rejects_zero_cycle() {
        let mut scheduler = FocusScheduler::new();
        assert!(matches!(
            scheduler.start(60, 0, 0, anchor()),
            Err(FocusError::Configuration(_))
        ));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_tick_reports_active_interval() {
        let mut scheduler = started(60);

        match scheduler.tick(at(10)) {
            TickOutcome::Active {
                interval,
                remaining,
                completed,
            } => {
                assert_eq!(interval.kind, IntervalKind::Work);
                assert_eq!(remaining, Duration::minutes(15));
                assert!(completed.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_tick_reports_completed_once() {
        let mut scheduler = started(60);
        scheduler.tick(at(1));

        let TickOutcome::Active { interval, completed, .. } = scheduler.tick(at(26)) else {
            panic!("expected active interval");
        };
        assert_eq!(interval.kind, IntervalKind::Break);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].kind, IntervalKind::Work);

        let TickOutcome::Active { completed, .. } = scheduler.tick(at(26)) else {
            panic!("expected active interval");
        };
        assert!(completed.is_empty());
    }

    #[test]
    fn test_tick_finishes_plan() {
        let mut scheduler = started(70);
        scheduler.tick(at(65));

        let TickOutcome::Finished { last, completed } = scheduler.tick(at(70)) else {
            panic!("expected finished plan");
        };
        assert_eq!(last.kind, IntervalKind::Work);
        assert_eq!(last.duration(), Duration::minutes(10));
        assert_eq!(completed, vec![last]);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.plan().is_empty());
    }

    #[test]
    fn test_pause_resume_rewrites_end() {
        let mut scheduler = started(60);
        let t1 = at(10);
        let t2 = at(40);

        let remaining = scheduler.pause(t1).unwrap();
        assert_eq!(remaining, Duration::minutes(15));
        assert!(scheduler.is_paused());

        // Time passing while paused changes nothing.
        assert!(matches!(
            scheduler.tick(at(35)),
            TickOutcome::Paused { remaining, .. } if remaining == Duration::minutes(15)
        ));

        let new_end = scheduler.resume(t2).unwrap();
        assert_eq!(new_end, t2 + remaining);

        let first = &scheduler.plan().intervals()[0];
        assert_eq!(first.end, t2 + remaining);
        assert_eq!(first.remaining(t2), remaining);

        // Later intervals are not shifted.
        assert_eq!(scheduler.plan().intervals()[1].start, at(25));
        assert_eq!(scheduler.plan().intervals()[1].end, at(30));
    }

    #[test]
    fn test_resumed_interval_stays_active() {
        let mut scheduler = started(60);
        scheduler.tick(at(20));
        scheduler.pause(at(20));
        scheduler.resume(at(50));

        let TickOutcome::Active { interval, remaining, completed } = scheduler.tick(at(52)) else {
            panic!("expected active interval");
        };
        assert_eq!(interval.kind, IntervalKind::Work);
        assert_eq!(interval.start, anchor());
        assert_eq!(remaining, Duration::minutes(3));
        assert!(completed.is_empty());
    }

    #[test]
    fn test_long_gap_reports_every_elapsed_interval() {
        let mut scheduler = started(70);
        scheduler.tick(at(1));

        let TickOutcome::Finished { completed, .. } = scheduler.tick(at(80)) else {
            panic!("expected finished plan");
        };
        assert_eq!(completed.len(), 5);
        assert_eq!(completed[0].start, anchor());
        assert_eq!(completed[4].end, at(70));
    }

    #[test]
    fn test_gap_inside_plan_reports_skipped_intervals() {
        let mut scheduler = started(70);
        scheduler.tick(at(1));

        let TickOutcome::Active { interval, completed, .. } = scheduler.tick(at(62)) else {
            panic!("expected active interval");
        };
        assert_eq!(interval.start, at(60));
        let starts: Vec<_> = completed.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec![at(0), at(25), at(30), at(55)]);
    }

    #[test]
    fn test_pause_across_boundary_still_reports_previous() {
        let mut scheduler = started(60);
        scheduler.tick(at(24));
        scheduler.pause(at(25) + Duration::milliseconds(500));
        scheduler.resume(at(26));

        let TickOutcome::Active { interval, completed, .. } = scheduler.tick(at(26)) else {
            panic!("expected active interval");
        };
        assert_eq!(interval.kind, IntervalKind::Break);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].start, anchor());
    }

    #[test]
    fn test_intervals_covered_by_resume_are_not_reported() {
        let mut scheduler = started(60);
        scheduler.tick(at(20));
        scheduler.pause(at(20));
        scheduler.resume(at(50));

        // The first work interval now ends at 55, covering 25-30 and 30-55.
        let TickOutcome::Active { interval, completed, .. } = scheduler.tick(at(56)) else {
            panic!("expected active interval");
        };
        assert_eq!(interval.start, at(55));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].start, anchor());
        assert_eq!(completed[0].end, at(55));
    }

    #[test]
    fn test_pause_requires_active_interval() {
        let mut scheduler = FocusScheduler::new();
        assert!(scheduler.pause(anchor()).is_none());

        let mut scheduler = started(60);
        assert!(scheduler.pause(at(90)).is_none());
        assert!(scheduler.resume(at(91)).is_none());
    }

    #[test]
    fn test_double_pause_keeps_first_capture() {
        let mut scheduler = started(60);
        scheduler.pause(at(5));
        assert!(scheduler.pause(at(7)).is_none());
        assert!(matches!(
            scheduler.tick(at(7)),
            TickOutcome::Paused { remaining, .. } if remaining == Duration::minutes(20)
        ));
    }

    #[test]
    fn test_abort_discards_everything() {
        let mut scheduler = started(60);
        scheduler.tick(at(1));
        scheduler.pause(at(2));
        scheduler.abort();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.plan().is_empty());
        assert!(scheduler.resume(at(3)).is_none());
        assert_eq!(scheduler.tick(at(3)), TickOutcome::Idle);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SchedulerState::Idle.to_string(), "Idle");
        assert_eq!(
            SchedulerState::Paused {
                remaining: Duration::seconds(5)
            }
            .to_string(),
            "Paused"
        );
    }
}
