//! Models command - manage classifier models.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use photo_pick_adapters::models::{default_models_dir, ensure_models, list_models, MODELS};

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// Download required models
    Fetch,
    /// List installed models
    List,
    /// Print model directory path
    Path,
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    let dir = args
        .dir
        .clone()
        .or_else(|| config.models.dir.clone())
        .unwrap_or_else(default_models_dir);

    match args.command {
        ModelsCommand::Fetch => fetch_models(&dir),
        ModelsCommand::List => print_list(&dir),
        ModelsCommand::Path => {
            println!("{}", dir.display());
            Ok(())
        }
    }
}

fn fetch_models(dir: &std::path::Path) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("downloading models...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    ensure_models(dir)?;

    spinner.finish_with_message("all models downloaded");
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_list(dir: &std::path::Path) -> Result<()> {
    let models = list_models(dir);

    println!("Models directory: {}", dir.display());
    println!();

    for (name, installed) in &models {
        let status = if *installed { "✓" } else { "✗" };
        let info = MODELS.iter().find(|m| m.name == name);
        let filename = info.map_or("unknown", |m| m.filename);
        println!("  {status} {name} ({filename})");
    }

    println!();
    let installed_count = models.iter().filter(|(_, installed)| *installed).count();
    println!("{}/{} models installed", installed_count, models.len());

    Ok(())
}
