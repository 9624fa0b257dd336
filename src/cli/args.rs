use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "focustimer")]
#[command(about = "A work/break focus timer with daily focus statistics")]
#[command(long_about = "focustimer - focus sessions in your terminal

Splits a total session into alternating work and break intervals,
counts down the active interval, stores completed work and shows
how many hours you focused on each of the last six days.

QUICK START:
  focustimer start                     60 minutes of 25/5 work/break
  focustimer start -t 90 -w 30 -b 10   Custom session
  focustimer plan -t 70                Preview the schedule
  focustimer stats                     Daily totals for the last six days

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and the session database
    ///
    /// Defaults to ~/.focustimer
    #[arg(long, global = true, env = "FOCUSTIMER_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a focus session in the terminal
    ///
    /// Counts down each work and break interval. Completed work is
    /// stored and the daily stats refresh when the session ends.
    ///
    /// Keys: p/space pause/resume, a abort, q quit
    ///
    /// # Examples
    ///
    ///   focustimer start
    ///   focustimer start --total 120 --work 40 --break 10
    #[command(alias = "s")]
    Start(SessionArgs),

    /// Show the schedule a session would follow
    ///
    /// # Examples
    ///
    ///   focustimer plan
    ///   focustimer plan --total 70
    Plan(SessionArgs),

    /// Show focused hours per day for the last six days
    ///
    /// # Examples
    ///
    ///   focustimer stats
    ///   focustimer stats --date 2024-05-10
    Stats(StatsArgs),

    /// List stored focus sessions, newest first
    History(HistoryArgs),

    /// Show or create the configuration file
    ///
    /// # Examples
    ///
    ///   focustimer config show
    ///   focustimer config init
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: focustimer completions zsh > ~/.zfunc/_focustimer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Session length arguments; unset values come from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Total session length in minutes (15-240)
    #[arg(short, long)]
    pub total: Option<u32>,

    /// Work interval length in minutes (25-40)
    #[arg(short, long)]
    pub work: Option<u32>,

    /// Break interval length in minutes (1-15)
    #[arg(short = 'b', long = "break")]
    pub break_minutes: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Last day of the window (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<chrono::NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Maximum number of sessions to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write config.yaml with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
