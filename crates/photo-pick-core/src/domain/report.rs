//! Folder-level analysis result.

use serde::{Deserialize, Serialize};

use super::ScoredPhoto;

/// Complete analysis of one product folder: every scored photo plus the
/// ordered chosen set. Produced by the engine, consumed by reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderAnalysis {
    /// Folder identifier (used for report naming and overrides).
    pub folder: String,
    /// Detected dominant product category.
    pub category: String,
    /// Confidence of the category detection.
    pub category_confidence: f32,
    /// Number of photos that were requested for selection.
    pub requested: usize,
    /// All scored photos, ordered by descending final score.
    pub photos: Vec<ScoredPhoto>,
    /// The chosen photos, in listing order (lead first).
    pub selected: Vec<ScoredPhoto>,
}

impl FolderAnalysis {
    /// An analysis for a folder with no readable photos.
    #[must_use]
    pub fn empty(folder: impl Into<String>, default_category: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            category: default_category.into(),
            category_confidence: 0.0,
            requested: 0,
            photos: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Whether any photo was scored at all.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Whether the selection filled every requested slot. A short selection
    /// is valid output, not an error; callers use this to report partial
    /// success.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selected.len() >= self.requested
    }
}
