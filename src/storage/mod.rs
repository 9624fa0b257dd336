//! Storage layer for focustimer.
//!
//! SQLite persistence for completed focus intervals.

mod database;
mod migrations;

pub use database::Database;
