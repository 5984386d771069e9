//! Folder analysis engine.
//!
//! Orchestrates one folder end to end: load photos, score them in parallel,
//! detect the folder category and select the best photos. All I/O and
//! inference goes through ports; the engine itself is deterministic for a
//! given set of inputs.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{CategoryRuleSet, FolderAnalysis, PhotoInfo, ScoredPhoto};
use crate::ports::{LabelProvider, PhotoSource, ProgressEvent, ProgressSink};
use crate::scoring::{CategoryDetector, PhotoScorer};
use crate::selection::{select_best, SelectionOverrides};

/// Analyzes product folders using a label provider and a rule set.
pub struct FolderEngine<'a> {
    provider: &'a dyn LabelProvider,
    rules: &'a CategoryRuleSet,
    overrides: &'a SelectionOverrides,
    num_best: usize,
}

impl<'a> FolderEngine<'a> {
    /// Creates an engine that selects up to `num_best` photos per folder.
    #[must_use]
    pub fn new(
        provider: &'a dyn LabelProvider,
        rules: &'a CategoryRuleSet,
        overrides: &'a SelectionOverrides,
        num_best: usize,
    ) -> Self {
        Self {
            provider,
            rules,
            overrides,
            num_best,
        }
    }

    /// Analyzes one folder: scores every readable photo, detects the
    /// dominant category and selects the best photos.
    ///
    /// Unreadable photos are skipped with a warning; per-photo classifier
    /// failures degrade that photo's content evidence instead of failing
    /// the folder. A folder with no readable photos yields an empty
    /// analysis.
    ///
    /// # Errors
    ///
    /// Currently infallible per folder; the `Result` covers future
    /// fail-fast conditions at the folder level.
    pub fn analyze(
        &self,
        folder_key: &str,
        source: &dyn PhotoSource,
        progress: &dyn ProgressSink,
    ) -> anyhow::Result<FolderAnalysis> {
        let mut photos: Vec<PhotoInfo> = Vec::new();
        let mut skipped = 0_usize;
        for item in source.photos() {
            match item {
                Ok(photo) => photos.push(photo),
                Err(err) => {
                    warn!("skipping unreadable photo: {err:#}");
                    skipped += 1;
                    progress.on_event(ProgressEvent::Skipped {
                        reason: format!("{err:#}"),
                    });
                }
            }
        }

        if photos.is_empty() {
            info!("folder {folder_key} has no readable photos");
            progress.on_event(ProgressEvent::Finished {
                processed: 0,
                skipped,
            });
            return Ok(FolderAnalysis::empty(
                folder_key,
                self.rules.default_category.clone(),
            ));
        }

        let total = photos.len();
        let scorer = PhotoScorer::new(self.rules);
        let mut scored: Vec<ScoredPhoto> = photos
            .par_iter()
            .map(|photo| {
                progress.on_event(ProgressEvent::Started {
                    filename: photo.filename.clone(),
                    total: Some(total),
                });
                let labels = match self.provider.classify(photo) {
                    Ok(labels) => Some(labels),
                    Err(err) => {
                        warn!("classification failed for {}: {err:#}", photo.filename);
                        None
                    }
                };
                let result = scorer.score(photo, labels.as_deref());
                progress.on_event(ProgressEvent::Scored {
                    filename: result.filename.clone(),
                    final_score: result.final_score,
                    content_type: result.content_type,
                    main_view: result.main_view,
                });
                result
            })
            .collect();

        // Deterministic listing order regardless of scoring order.
        scored.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.filename.cmp(&b.filename))
        });

        let category = CategoryDetector::new(self.rules).detect(&scored);
        debug!(
            "folder {folder_key}: category {} ({:.2})",
            category.name, category.confidence
        );

        let selected = select_best(&scored, self.num_best, folder_key, self.overrides);
        progress.on_event(ProgressEvent::Finished {
            processed: total,
            skipped,
        });
        info!(
            "folder {folder_key}: {} photos scored, {} skipped, {} selected",
            total,
            skipped,
            selected.len()
        );

        Ok(FolderAnalysis {
            folder: folder_key.to_string(),
            category: category.name,
            category_confidence: category.confidence,
            requested: self.num_best,
            photos: scored,
            selected,
        })
    }
}
