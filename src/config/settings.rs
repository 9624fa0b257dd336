//! Configuration settings for focustimer.
//!
//! Settings are loaded from `~/.focustimer/config.yaml`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::focus::PersistPolicy;

/// Allowed total session length in minutes.
pub const TOTAL_MINUTES_RANGE: RangeInclusive<u32> = 15..=240;
/// Allowed work interval length in minutes.
pub const WORK_MINUTES_RANGE: RangeInclusive<u32> = 25..=40;
/// Allowed break interval length in minutes.
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=15;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus session settings.
    pub focus: FocusConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored`'s global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Focus session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FocusConfig {
    /// Total session length in minutes.
    #[serde(default = "default_total_minutes")]
    pub total_minutes: u32,
    /// Work interval length in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break interval length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Which completed intervals are stored.
    #[serde(default)]
    pub persist: PersistPolicy,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_total_minutes() -> u32 {
    60
}

const fn default_work_minutes() -> u32 {
    25
}

const fn default_break_minutes() -> u32 {
    5
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            total_minutes: default_total_minutes(),
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            persist: PersistPolicy::default(),
        }
    }
}

impl FocusConfig {
    /// Check the durations against the allowed ranges.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Configuration` naming the first value out of range.
    pub fn validate(&self) -> Result<(), FocusError> {
        check_range("total", self.total_minutes, &TOTAL_MINUTES_RANGE)?;
        check_range("work", self.work_minutes, &WORK_MINUTES_RANGE)?;
        check_range("break", self.break_minutes, &BREAK_MINUTES_RANGE)
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), FocusError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(FocusError::Configuration(format!(
            "{name} duration must be between {} and {} minutes, got {value}",
            range.start(),
            range.end()
        )))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            FocusError::Configuration(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, FocusError> {
        serde_yaml::to_string(self)
            .map_err(|e| FocusError::Configuration(format!("Failed to serialize config: {e}")))
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            FocusError::Configuration(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
