//! Folder-level category detection.

use tracing::debug;

use crate::domain::{CategoryRuleSet, ScoredPhoto};

/// Evidence weight for a primary-keyword match.
const PRIMARY_EVIDENCE: f32 = 2.0;
/// Evidence weight for a secondary-keyword match.
const SECONDARY_EVIDENCE: f32 = 0.5;

/// Confidence reported when no label evidence exists at all.
const NO_EVIDENCE_CONFIDENCE: f32 = 0.5;
/// Confidence reported when labels exist but none match any category.
const NO_MATCH_CONFIDENCE: f32 = 0.3;

/// The detected dominant product category for a folder.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedCategory {
    pub name: String,
    pub confidence: f32,
}

/// Aggregates label evidence across a batch of scored photos to infer the
/// dominant product category.
pub struct CategoryDetector<'a> {
    rules: &'a CategoryRuleSet,
}

impl<'a> CategoryDetector<'a> {
    /// Creates a detector over the given rule set.
    #[must_use]
    pub const fn new(rules: &'a CategoryRuleSet) -> Self {
        Self { rules }
    }

    /// Detects the dominant category.
    ///
    /// Per-category evidence is averaged over that category's matching
    /// labels rather than summed, so a category with few strong hits is
    /// not penalized against one with many weak hits. Falls back to the
    /// configured default category instead of failing.
    #[must_use]
    pub fn detect(&self, photos: &[ScoredPhoto]) -> DetectedCategory {
        let labels: Vec<_> = photos.iter().flat_map(|p| p.labels.iter()).collect();
        if labels.is_empty() {
            debug!("no label evidence in batch, falling back to default category");
            return DetectedCategory {
                name: self.rules.default_category.clone(),
                confidence: NO_EVIDENCE_CONFIDENCE,
            };
        }

        let mut best: Option<DetectedCategory> = None;
        for (name, category) in &self.rules.categories {
            let mut evidence = 0.0_f32;
            let mut matches = 0_u32;

            for entry in &labels {
                let label = entry.label.to_lowercase();
                if CategoryRuleSet::first_match(&category.primary, &label).is_some() {
                    evidence += entry.confidence * PRIMARY_EVIDENCE;
                    matches += 1;
                } else if CategoryRuleSet::first_match(&category.secondary, &label).is_some() {
                    evidence += entry.confidence * SECONDARY_EVIDENCE;
                    matches += 1;
                }
            }

            if matches == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let average = evidence / matches as f32;
            if best.as_ref().map_or(true, |b| average > b.confidence) {
                best = Some(DetectedCategory {
                    name: name.clone(),
                    confidence: average,
                });
            }
        }

        best.unwrap_or_else(|| {
            debug!("no category keyword matched, falling back to default category");
            DetectedCategory {
                name: self.rules.default_category.clone(),
                confidence: NO_MATCH_CONFIDENCE,
            }
        })
    }
}
