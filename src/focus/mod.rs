//! Focus sessions: scheduling, persistence and daily stats.
//!
//! - Split a total duration into alternating work/break intervals
//! - Track the active interval, with pause/resume/abort
//! - Persist completed work intervals
//! - Roll stored intervals into per-day totals

pub mod driver;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod timer;

pub use driver::{FocusDriver, PersistPolicy, SessionSink};
pub use report::{DailyFocusTime, DailyStats};
pub use scheduler::{FocusScheduler, SchedulerState, TickOutcome};
pub use session::{Interval, IntervalKind, Plan};
pub use storage::{CompletedSessionRecord, FocusStorage, TRAILING_WINDOW_DAYS};
pub use timer::{format_duration, format_duration_mmss, progress};
