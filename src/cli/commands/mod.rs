//! Command implementations for focustimer.
//!
//! Each command returns the text to print; `main` does the printing.

mod config;
mod focus;
mod shell;

pub use config::config;
pub use focus::{history, plan, start, stats};
pub use shell::completions;

use crate::cli::args::{Cli, OutputFormat, SessionArgs};
use crate::config::{Config, FocusConfig, Paths};
use crate::error::FocusError;
use crate::focus::FocusStorage;
use crate::storage::Database;

/// Resolved paths, configuration and output format for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Data directory layout
    pub paths: Paths,
    /// Loaded configuration
    pub config: Config,
    /// Output format after applying the config default
    pub format: OutputFormat,
}

impl Context {
    /// Resolve the context from command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the config file
    /// cannot be parsed.
    pub fn from_cli(cli: &Cli) -> Result<Self, FocusError> {
        let paths = match &cli.data_dir {
            Some(dir) => Paths::with_root(dir.clone()),
            None => Paths::new()?,
        };
        let config = Config::load_from_path(&paths.config_file)?;
        config.general.color.apply();
        let format = cli.output.unwrap_or(config.general.default_output);

        Ok(Self {
            paths,
            config,
            format,
        })
    }

    /// Open the session store, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Storage` if the database cannot be opened.
    pub fn open_storage(&self) -> Result<FocusStorage, FocusError> {
        let db = Database::open(&self.paths)?;
        Ok(FocusStorage::with_database(db))
    }

    /// Merge session flags over the configured defaults and validate them.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Configuration` if a duration is out of range.
    pub fn session_settings(&self, args: &SessionArgs) -> Result<FocusConfig, FocusError> {
        let defaults = &self.config.focus;
        let settings = FocusConfig {
            total_minutes: args.total.unwrap_or(defaults.total_minutes),
            work_minutes: args.work.unwrap_or(defaults.work_minutes),
            break_minutes: args.break_minutes.unwrap_or(defaults.break_minutes),
            persist: defaults.persist,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::PersistPolicy;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context {
            paths: Paths::with_root(dir.path().to_path_buf()),
            config: Config::default(),
            format: OutputFormat::Pretty,
        }
    }

    #[test]
    fn test_session_settings_merge() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        ctx.config.focus.persist = PersistPolicy::FinalInterval;

        let args = SessionArgs {
            total: Some(90),
            work: None,
            break_minutes: Some(10),
        };
        let settings = ctx.session_settings(&args).unwrap();

        assert_eq!(settings.total_minutes, 90);
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.break_minutes, 10);
        assert_eq!(settings.persist, PersistPolicy::FinalInterval);
    }

    #[test]
    fn test_session_settings_out_of_range() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let args = SessionArgs {
            total: Some(500),
            ..SessionArgs::default()
        };
        assert!(matches!(
            ctx.session_settings(&args),
            Err(FocusError::Configuration(_))
        ));
    }

    #[test]
    fn test_open_storage_creates_directory() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        ctx.paths = Paths::with_root(dir.path().join("data"));

        ctx.open_storage().unwrap();
        assert!(ctx.paths.database.exists());
    }
}
