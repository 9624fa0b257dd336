//! `SQLite` connection for the session store.
//!
//! The file lives at `~/.focustimer/focus_sessions.db` (or under
//! `--data-dir`) and holds the append-only `sessions` table. Opening it
//! always brings the schema up to date.

use std::path::Path;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::FocusError;

use super::migrations;

/// Migrated connection to the session store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `focus_sessions.db` under the data directory, creating both.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be opened, or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, FocusError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the session store at `path`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the file cannot be opened or
    /// migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, FocusError> {
        let conn = Connection::open(path).map_err(|e| {
            FocusError::Storage(format!("Failed to open session store {}: {e}", path.display()))
        })?;
        log::debug!("opened session store {}", path.display());
        Self::migrated(conn)
    }

    /// Open a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if migrations fail.
    pub fn open_in_memory() -> Result<Self, FocusError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FocusError::Storage(format!("Failed to open in-memory store: {e}")))?;
        Self::migrated(conn)
    }

    fn migrated(conn: Connection) -> Result<Self, FocusError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn version(db: &Database) -> i32 {
        migrations::get_version(db.connection()).unwrap()
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(version(&db) > 0);
    }

    #[test]
    fn test_open_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        let db = Database::open(&paths).unwrap();
        assert!(version(&db) > 0);
        assert!(paths.database.exists());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("focus_sessions.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO sessions (start_time, end_time, session_type)
                     VALUES ('2024-05-10T09:00:00', '2024-05-10T09:25:00', 'work')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert!(version(&db) > 0);
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("missing").join("focus_sessions.db");

        assert!(matches!(
            Database::open_at(&db_path),
            Err(FocusError::Storage(_))
        ));
    }
}
