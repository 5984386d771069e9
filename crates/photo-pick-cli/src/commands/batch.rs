//! Batch command - analyze every subfolder of a product root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use photo_pick_adapters::{FsPhotoSource, FsReporter};
use photo_pick_core::engine::FolderEngine;
use photo_pick_core::ports::{PhotoSource, ReportSink};
use photo_pick_core::selection::SelectionOverrides;
use serde::Serialize;
use tracing::{info, warn};

use super::pick::{folder_key, photos_dir, RunContext, SelectionOpts};
use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Arguments for the batch command.
#[derive(Args, Clone)]
pub struct BatchArgs {
    /// Root directory whose subfolders are product folders
    pub root: PathBuf,

    #[command(flatten)]
    pub opts: SelectionOpts,

    /// Override pins from the merged config (not settable from CLI).
    #[arg(skip)]
    overrides: SelectionOverrides,
}

impl BatchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.opts.apply_config(config);
        args.overrides = config.overrides.clone();
        args
    }
}

/// Aggregate result over all subfolders.
#[derive(Debug, Serialize)]
struct BatchReport {
    root: String,
    folders: Vec<FolderSummary>,
    complete: usize,
    incomplete: usize,
    failed: usize,
}

/// One folder's outcome in the batch report.
#[derive(Debug, Serialize)]
struct FolderSummary {
    folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    selected: Vec<String>,
    requested: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the batch command.
///
/// Per-folder failures are recorded and the batch continues; only a setup
/// failure (classifier, rules) aborts the whole run.
pub fn run(args: &BatchArgs) -> Result<ExitCode> {
    let folders = subfolders(&args.root)?;
    if folders.is_empty() {
        anyhow::bail!("no subfolders found in {}", args.root.display());
    }
    info!("batch over {} folders in {}", folders.len(), args.root.display());

    let ctx = RunContext::prepare(&args.opts, args.overrides.clone())?;
    let engine = FolderEngine::new(&ctx.classifier, &ctx.rules, &ctx.overrides, ctx.num_best);

    let mut summaries = Vec::with_capacity(folders.len());
    let mut complete = 0_usize;
    let mut incomplete = 0_usize;
    let mut failed = 0_usize;

    for folder in &folders {
        let key = folder_key(folder);
        let source = FsPhotoSource::new(photos_dir(folder));
        let progress = ProgressBar::new(
            source.count_hint().map(|t| t as u64),
            args.opts.quiet,
            args.opts.show_progress(),
        );

        match engine.analyze(&key, &source, &progress) {
            Ok(analysis) => {
                if let Some(ref output) = args.opts.output {
                    if let Err(err) = FsReporter::new(output).write(&analysis) {
                        warn!("failed to write report for folder {key}: {err:#}");
                    }
                }
                if analysis.has_candidates() && analysis.is_complete() {
                    complete += 1;
                } else {
                    incomplete += 1;
                }
                summaries.push(FolderSummary {
                    folder: analysis.folder.clone(),
                    category: Some(analysis.category.clone()),
                    selected: analysis
                        .selected
                        .iter()
                        .map(|p| p.filename.clone())
                        .collect(),
                    requested: analysis.requested,
                    error: None,
                });
            }
            Err(err) => {
                warn!("folder {key} failed: {err:#}");
                failed += 1;
                summaries.push(FolderSummary {
                    folder: key,
                    category: None,
                    selected: Vec::new(),
                    requested: ctx.num_best,
                    error: Some(format!("{err:#}")),
                });
            }
        }
    }

    let report = BatchReport {
        root: args.root.display().to_string(),
        folders: summaries,
        complete,
        incomplete,
        failed,
    };
    JsonOutput::stdout().write_value(&report, args.opts.pretty)?;

    info!("batch done: {complete} complete, {incomplete} incomplete, {failed} failed");
    if failed > 0 || incomplete > 0 {
        Ok(ExitCode::Incomplete)
    } else {
        Ok(ExitCode::Success)
    }
}

/// The sorted product subfolders of `root`.
fn subfolders(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read {}", root.display()))?;
    let mut folders: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}
