//! Error types for focustimer.

use thiserror::Error;

/// Errors that can occur in focustimer.
#[derive(Debug, Error)]
pub enum FocusError {
    /// The session store could not be opened, read, or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Scheduling parameters or configuration values are unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The terminal UI could not be set up or drawn.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O failure outside the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for FocusError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
