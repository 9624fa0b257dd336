//! Completed session storage.
//!
//! Appends finished intervals to the `sessions` table and rolls them up
//! into per-day focus totals.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::driver::SessionSink;
use super::session::Interval;
use crate::error::FocusError;
use crate::storage::Database;

/// Number of calendar days covered by [`FocusStorage::daily_totals`], including the as-of date.
pub const TRAILING_WINDOW_DAYS: i64 = 6;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A persisted interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSessionRecord {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Local wall-clock start
    pub start: NaiveDateTime,
    /// Local wall-clock end
    pub end: NaiveDateTime,
    /// Free-form label, normally "work"
    pub session_type: String,
}

impl CompletedSessionRecord {
    /// Create an unsaved record.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, session_type: impl Into<String>) -> Self {
        Self {
            id: None,
            start,
            end,
            session_type: session_type.into(),
        }
    }

    /// Record an interval under the given label.
    #[must_use]
    pub fn from_interval(interval: &Interval, session_type: impl Into<String>) -> Self {
        Self::new(
            interval.start.naive_local(),
            interval.end.naive_local(),
            session_type,
        )
    }

    /// Length of the record.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }
}

/// Storage for completed focus intervals.
pub struct FocusStorage {
    db: Database,
}

impl FocusStorage {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Append one record.
    ///
    /// No deduplication or validation is done.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the row cannot be written.
    pub fn append(&self, record: &CompletedSessionRecord) -> Result<i64, FocusError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO sessions (start_time, end_time, session_type) VALUES (?1, ?2, ?3)",
            params![
                record.start.format(TIMESTAMP_FORMAT).to_string(),
                record.end.format(TIMESTAMP_FORMAT).to_string(),
                record.session_type,
            ],
        )
        .map_err(|e| FocusError::Storage(format!("Failed to append session: {e}")))?;

        let id = conn.last_insert_rowid();
        log::debug!(
            "appended {} session {id}: {} -> {}",
            record.session_type,
            record.start,
            record.end
        );
        Ok(id)
    }

    /// Focused hours per day for the window ending at `as_of`.
    ///
    /// Covers `as_of - 5 days` through `as_of`. Seconds are summed as integers
    /// per day and divided by 3600 once. Days without records are absent.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the query fails.
    pub fn daily_totals(&self, as_of: NaiveDate) -> Result<BTreeMap<NaiveDate, f64>, FocusError> {
        let window_start = as_of - Duration::days(TRAILING_WINDOW_DAYS - 1);
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT start_time, end_time
                  FROM sessions
                  WHERE date(start_time) BETWEEN ?1 AND ?2",
            )
            .map_err(|e| FocusError::Storage(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(
                [
                    window_start.format("%Y-%m-%d").to_string(),
                    as_of.format("%Y-%m-%d").to_string(),
                ],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .map_err(|e| FocusError::Storage(format!("Failed to query daily totals: {e}")))?;

        let mut seconds: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for row in rows {
            let (start_str, end_str) = row.map_err(|e| FocusError::Storage(e.to_string()))?;
            let (Some(start), Some(end)) = (parse_timestamp(&start_str), parse_timestamp(&end_str))
            else {
                log::warn!("skipping session with unreadable timestamps: {start_str} / {end_str}");
                continue;
            };
            *seconds.entry(start.date()).or_insert(0) += end.signed_duration_since(start).num_seconds();
        }

        #[allow(clippy::cast_precision_loss)]
        let hours = seconds
            .into_iter()
            .map(|(date, secs)| (date, secs as f64 / 3600.0))
            .collect();

        Ok(hours)
    }

    /// Most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<CompletedSessionRecord>, FocusError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, start_time, end_time, session_type
                  FROM sessions
                  ORDER BY start_time DESC, id DESC
                  LIMIT ?1",
            )
            .map_err(|e| FocusError::Storage(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_record)
            .map_err(|e| FocusError::Storage(format!("Failed to query sessions: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| FocusError::Storage(e.to_string()))?);
        }

        Ok(records)
    }
}

impl SessionSink for FocusStorage {
    fn record(&self, record: &CompletedSessionRecord) -> Result<(), FocusError> {
        self.append(record).map(|_| ())
    }
}

/// Accepts ISO text with a `T` or space separator and optional fraction.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn row_to_record(row: &Row<'_>) -> Result<CompletedSessionRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let start_str: String = row.get(1)?;
    let end_str: String = row.get(2)?;
    let session_type: String = row.get(3)?;

    let invalid = |col: usize, value: &str| {
        rusqlite::Error::FromSqlConversionFailure(
            col,
            rusqlite::types::Type::Text,
            format!("invalid timestamp: {value}").into(),
        )
    };

    let start = parse_timestamp(&start_str).ok_or_else(|| invalid(1, &start_str))?;
    let end = parse_timestamp(&end_str).ok_or_else(|| invalid(2, &end_str))?;

    Ok(CompletedSessionRecord {
        id: Some(id),
        start,
        end,
        session_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn create_test_storage() -> FocusStorage {
        let db = Database::open_in_memory().unwrap();
        FocusStorage::with_database(db)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn record(date: NaiveDate, hour: u32, seconds: i64) -> CompletedSessionRecord {
        let start = date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap());
        CompletedSessionRecord::new(start, start + Duration::seconds(seconds), "work")
    }

    #[test]
    fn test_append_returns_id() {
        let storage = create_test_storage();

        let first = storage.append(&record(day(1), 9, 1500)).unwrap();
        let second = storage.append(&record(day(1), 10, 1500)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_daily_totals_groups_by_day() {
        let storage = create_test_storage();
        storage.append(&record(day(9), 9, 1500)).unwrap();
        storage.append(&record(day(9), 10, 1500)).unwrap();
        storage.append(&record(day(10), 9, 3600)).unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();

        assert_eq!(totals.len(), 2);
        assert!((totals[&day(9)] - 3000.0 / 3600.0).abs() < 1e-9);
        assert!((totals[&day(10)] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_totals_window_boundaries() {
        let storage = create_test_storage();
        storage.append(&record(day(4), 9, 3600)).unwrap();
        storage.append(&record(day(5), 9, 3600)).unwrap();
        storage.append(&record(day(10), 23, 1800)).unwrap();
        storage.append(&record(day(11), 9, 3600)).unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();

        // 2024-05-05 is exactly five days back; 2024-05-04 is outside.
        assert_eq!(totals.keys().copied().collect::<Vec<_>>(), vec![day(5), day(10)]);
        assert!((totals[&day(10)] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_daily_totals_omits_empty_days() {
        let storage = create_test_storage();
        storage.append(&record(day(7), 9, 600)).unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();
        assert!(!totals.contains_key(&day(8)));
        assert!(!totals.contains_key(&day(10)));

        assert!(storage.daily_totals(day(20)).unwrap().is_empty());
    }

    #[test]
    fn test_daily_totals_counts_any_label() {
        let storage = create_test_storage();
        let mut brk = record(day(10), 9, 300);
        brk.session_type = "break".to_string();
        storage.append(&brk).unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();
        assert!((totals[&day(10)] - 300.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_totals_keeps_fractional_hours() {
        let storage = create_test_storage();
        storage.append(&record(day(10), 9, 60)).unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();
        assert!(totals[&day(10)] > 0.0);
        assert!((totals[&day(10)] - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_subsecond_timestamps_round_trip() {
        let storage = create_test_storage();
        let start = day(10)
            .and_hms_micro_opt(9, 0, 0, 250_000)
            .unwrap();
        let rec = CompletedSessionRecord::new(start, start + Duration::minutes(25), "work");
        storage.append(&rec).unwrap();

        let loaded = storage.recent(1).unwrap();
        assert_eq!(loaded[0].start, rec.start);
        assert_eq!(loaded[0].end, rec.end);
        assert_eq!(loaded[0].duration(), Duration::minutes(25));
    }

    #[test]
    fn test_reads_rows_written_by_other_tools() {
        let storage = create_test_storage();
        storage
            .db
            .connection()
            .execute_batch(
                "INSERT INTO sessions (start_time, end_time, session_type) VALUES
                   ('2024-05-10T09:00:00', '2024-05-10T09:25:00', 'work'),
                   ('2024-05-10 10:00:00.500000', '2024-05-10 10:30:00.500000', 'work'),
                   ('garbage', '2024-05-10T11:00:00', 'work');",
            )
            .unwrap();

        let totals = storage.daily_totals(day(10)).unwrap();
        assert!((totals[&day(10)] - 3300.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_newest_first() {
        let storage = create_test_storage();
        for d in 1..=5 {
            storage.append(&record(day(d), 9, 1500)).unwrap();
        }

        let recent = storage.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].start.date(), day(5));
        assert_eq!(recent[2].start.date(), day(3));
        assert!(recent.iter().all(|r| r.id.is_some()));
    }

    #[test]
    fn test_sink_appends() {
        let storage = create_test_storage();
        storage.record(&record(day(10), 9, 1500)).unwrap();

        assert_eq!(storage.recent(10).unwrap().len(), 1);
    }

    #[test]
    fn test_append_fails_without_table() {
        let storage = create_test_storage();
        storage
            .db
            .connection()
            .execute_batch("DROP TABLE sessions;")
            .unwrap();

        let err = storage.append(&record(day(10), 9, 1500)).unwrap_err();
        assert!(matches!(err, FocusError::Storage(_)));
    }
}
