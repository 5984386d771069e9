//! Pick command - analyze one product folder and select its best photos.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use photo_pick_adapters::{default_models_dir, model_path, CandleClassifier, FsPhotoSource, FsReporter};
use photo_pick_core::domain::CategoryRuleSet;
use photo_pick_core::engine::FolderEngine;
use photo_pick_core::ports::{PhotoSource, ReportSink};
use photo_pick_core::selection::SelectionOverrides;
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Default number of photos selected per folder.
const DEFAULT_NUM_BEST: usize = 2;

/// Selection options shared by `pick` and `batch`.
#[derive(Args, Clone)]
pub struct SelectionOpts {
    /// Number of photos to select
    #[arg(short = 'n', long, value_name = "N")]
    pub num_best: Option<usize>,

    /// Copy winners and report into this directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Category rules TOML file (replaces the built-in rules)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl SelectionOpts {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub(crate) fn apply_config(&mut self, config: &AppConfig) {
        self.num_best = self.num_best.or(config.general.num_best);
        if self.output.is_none() {
            self.output.clone_from(&config.general.output_dir);
        }
        if self.rules.is_none() {
            self.rules.clone_from(&config.rules.path);
        }
        if self.models_dir.is_none() {
            self.models_dir.clone_from(&config.models.dir);
        }
        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
        if !self.progress {
            self.progress = config.output.progress.unwrap_or(false);
        }
    }

    /// Number of photos to select, with the hardcoded fallback.
    #[must_use]
    pub fn num_best(&self) -> usize {
        self.num_best.unwrap_or(DEFAULT_NUM_BEST)
    }

    /// Whether to show the progress bar.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.quiet && (self.progress || std::io::stderr().is_terminal())
    }
}

/// Arguments for the pick command.
#[derive(Args, Clone)]
pub struct PickArgs {
    /// Product folder to analyze
    pub folder: Option<PathBuf>,

    #[command(flatten)]
    pub opts: SelectionOpts,

    /// Override pins from the merged config (not settable from CLI).
    #[arg(skip)]
    overrides: SelectionOverrides,
}

impl PickArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.opts.apply_config(config);
        args.overrides = config.overrides.clone();
        args
    }
}

/// Everything the engine needs, resolved once per run.
pub struct RunContext {
    pub rules: CategoryRuleSet,
    pub overrides: SelectionOverrides,
    pub classifier: CandleClassifier,
    pub num_best: usize,
}

impl RunContext {
    /// Resolves rules, override pins and the classifier.
    ///
    /// A classifier that cannot start is fatal for the whole run; the
    /// engine never degrades every photo silently.
    pub fn prepare(opts: &SelectionOpts, overrides: SelectionOverrides) -> Result<Self> {
        let rules = load_rules(opts.rules.as_deref())?;

        let models_dir = opts
            .models_dir
            .clone()
            .unwrap_or_else(default_models_dir);
        let weights =
            model_path(&models_dir, "convnext").context("unknown classifier model")?;
        if !weights.exists() {
            anyhow::bail!(
                "classifier model not found at {}. Run `photo-pick models fetch`.",
                weights.display()
            );
        }
        let classifier = CandleClassifier::load(&weights)?;

        Ok(Self {
            rules,
            overrides,
            classifier,
            num_best: opts.num_best(),
        })
    }
}

/// Loads category rules from a TOML file, or the built-in defaults.
fn load_rules(path: Option<&Path>) -> Result<CategoryRuleSet> {
    match path {
        Some(path) => {
            debug!("loading category rules from {}", path.display());
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read rules file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse rules file {}", path.display()))
        }
        None => Ok(CategoryRuleSet::default()),
    }
}

/// The folder that actually holds the photos: product folders may keep
/// their full-size images in a `big/` subdirectory.
pub fn photos_dir(folder: &Path) -> PathBuf {
    let big = folder.join("big");
    if big.is_dir() {
        big
    } else {
        folder.to_path_buf()
    }
}

/// Key identifying a folder in reports and the override table.
pub fn folder_key(folder: &Path) -> String {
    folder
        .file_name()
        .map_or_else(|| folder.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Run the pick command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &PickArgs) -> Result<ExitCode> {
    let folder = args
        .folder
        .as_deref()
        .context("no folder specified")?;
    if !folder.is_dir() {
        anyhow::bail!("not a directory: {}", folder.display());
    }

    let ctx = RunContext::prepare(&args.opts, args.overrides.clone())?;
    let engine = FolderEngine::new(&ctx.classifier, &ctx.rules, &ctx.overrides, ctx.num_best);

    let key = folder_key(folder);
    let source = FsPhotoSource::new(photos_dir(folder));
    let progress = ProgressBar::new(
        source.count_hint().map(|t| t as u64),
        args.opts.quiet,
        args.opts.show_progress(),
    );

    let analysis = engine.analyze(&key, &source, &progress)?;

    JsonOutput::stdout().write_analysis(&analysis, args.opts.pretty)?;

    if let Some(ref output) = args.opts.output {
        FsReporter::new(output).write(&analysis)?;
    }

    if analysis.has_candidates() && analysis.is_complete() {
        Ok(ExitCode::Success)
    } else {
        info!(
            "selected {} of {} requested photos",
            analysis.selected.len(),
            analysis.requested
        );
        Ok(ExitCode::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_key_uses_directory_name() {
        assert_eq!(folder_key(Path::new("/data/products/42")), "42");
        assert_eq!(folder_key(Path::new("relative/7")), "7");
    }

    #[test]
    fn test_photos_dir_prefers_big_subdir() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        assert_eq!(photos_dir(dir.path()), dir.path());

        std::fs::create_dir(dir.path().join("big")).expect("mkdir");
        assert_eq!(photos_dir(dir.path()), dir.path().join("big"));
    }

    #[test]
    fn test_load_rules_default_and_file() {
        let rules = load_rules(None).expect("default rules");
        assert!(rules.get("bags").is_some());

        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("rules.toml");
        std::fs::write(
            &path,
            r#"
default_category = "widgets"

[categories.widgets.primary]
widget = 4.0
"#,
        )
        .expect("write rules");
        let rules = load_rules(Some(&path)).expect("file rules");
        assert_eq!(rules.default_category, "widgets");
        assert!(rules.get("widgets").is_some());
    }
}
