//! Config command implementation.

use super::Context;
use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::FocusError;
use crate::output::to_json;

/// Show the effective configuration or write the default file.
///
/// # Errors
///
/// Returns an error if the file already exists (without `--force`) or
/// cannot be written.
pub fn config(ctx: &Context, command: &ConfigCommands) -> Result<String, FocusError> {
    match command {
        ConfigCommands::Show => match ctx.format {
            OutputFormat::Json => to_json(&ctx.config),
            OutputFormat::Pretty => ctx.config.to_yaml(),
        },
        ConfigCommands::Init { force } => {
            let path = &ctx.paths.config_file;
            if path.exists() && !force {
                return Err(FocusError::Configuration(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            ctx.paths.ensure_dirs()?;
            Config::default().save_to_path(path)?;
            log::info!("wrote default config to {}", path.display());
            Ok(format!("Wrote default configuration to {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Paths;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context {
            paths: Paths::with_root(dir.path().join("data")),
            config: Config::default(),
            format: OutputFormat::Pretty,
        }
    }

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        config(&ctx, &ConfigCommands::Init { force: false }).unwrap();

        let loaded = Config::load_from_path(&ctx.paths.config_file).unwrap();
        assert_eq!(loaded.focus, Config::default().focus);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        config(&ctx, &ConfigCommands::Init { force: false }).unwrap();

        let err = config(&ctx, &ConfigCommands::Init { force: false }).unwrap_err();
        assert!(matches!(err, FocusError::Configuration(_)));
        assert!(config(&ctx, &ConfigCommands::Init { force: true }).is_ok());
    }

    #[test]
    fn test_show_yaml() {
        let dir = TempDir::new().unwrap();
        let text = config(&context(&dir), &ConfigCommands::Show).unwrap();
        assert!(text.contains("total_minutes: 60"));
        assert!(text.contains("persist: every_work_interval"));
    }
}
