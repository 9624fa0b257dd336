//! Configuration management for focustimer.
//!
//! This module handles loading and saving configuration from `~/.focustimer/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    ColorSetting, Config, FocusConfig, GeneralConfig, BREAK_MINUTES_RANGE, TOTAL_MINUTES_RANGE,
    WORK_MINUTES_RANGE,
};
