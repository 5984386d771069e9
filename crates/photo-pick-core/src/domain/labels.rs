//! Label evidence produced by the image classifier.

use serde::{Deserialize, Serialize};

/// Number of top-ranked labels considered per photo. The confidence tail
/// below this rank is too noisy to carry signal.
pub const TOP_LABELS: usize = 5;

/// A single classifier label with its confidence, in `[0, 1]`.
///
/// Providers return these sorted by descending confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Classifier label text, lowercased by the scorer before matching.
    pub label: String,
    /// Classifier confidence for this label.
    pub confidence: f32,
}

impl LabelScore {
    /// Creates a new label/confidence pair.
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Returns the top-ranked prefix of `labels` that scoring considers.
#[must_use]
pub fn top_labels(labels: &[LabelScore]) -> &[LabelScore] {
    &labels[..labels.len().min(TOP_LABELS)]
}
