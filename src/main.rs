use clap::Parser;
use colored::Colorize;

use focustimer::cli::args::{Cli, Commands};
use focustimer::cli::commands::{self, Context};
use focustimer::error::FocusError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FocusError> {
    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli)?;

    let output = match &cli.command {
        Commands::Start(args) => commands::start(&ctx, args)?,
        Commands::Plan(args) => commands::plan(&ctx, args)?,
        Commands::Stats(args) => commands::stats(&ctx, args)?,
        Commands::History(args) => commands::history(&ctx, args)?,
        Commands::Config(args) => commands::config(&ctx, &args.command)?,
        Commands::Completions { shell } => commands::completions(*shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
