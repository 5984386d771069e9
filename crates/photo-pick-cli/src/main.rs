//! Photo Pick CLI - selects the best product photos from a folder.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Pick(args)) => run_pick(args, &config),
        Some(Commands::Batch(args)) => {
            let args = commands::batch::BatchArgs::with_config(args, &config);
            match commands::batch::run(&args) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::Error
                }
            }
        }
        Some(Commands::Models(ref args)) => match commands::models::run(args, &config) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
        None => {
            // Default behavior: run pick with flattened args
            if cli.pick.folder.is_none() {
                eprintln!("error: No folder specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_pick(cli.pick, &config)
        }
    };

    exit_code.into()
}

fn run_pick(args: commands::pick::PickArgs, config: &AppConfig) -> ExitCode {
    let args = commands::pick::PickArgs::with_config(args, config);
    match commands::pick::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
