//! Command-line interface for focustimer.

pub mod args;
pub mod commands;
