//! CLI command definitions and handlers.

pub mod batch;
pub mod models;
pub mod pick;

use clap::{Parser, Subcommand};

/// Photo Pick - selects the best product photos from a folder
#[derive(Parser)]
#[command(name = "photo-pick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared pick arguments (folder, selection options).
    #[command(flatten)]
    pub pick: pick::PickArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one product folder and select its best photos
    Pick(pick::PickArgs),
    /// Analyze every subfolder of a root directory
    Batch(batch::BatchArgs),
    /// Manage classifier models
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every requested slot was filled.
    Success,
    /// The selection is shorter than requested, or a batch folder failed.
    Incomplete,
    /// The run itself failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Incomplete => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
