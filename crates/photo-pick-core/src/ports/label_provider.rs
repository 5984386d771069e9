//! Label provider port - the image classifier boundary.

use crate::domain::{LabelScore, PhotoInfo};

/// Port for the image classifier.
///
/// Implementations are treated as read-only, stateless services. They must
/// be safe for concurrent invocation; adapters backed by a single model
/// instance may serialize calls internally.
pub trait LabelProvider: Send + Sync {
    /// Classifies a photo into ranked labels, sorted by descending
    /// confidence. At least five entries are expected for a valid image.
    ///
    /// # Errors
    ///
    /// Returns an error if classification fails for this photo. The engine
    /// treats that as missing evidence for the one photo, not as a fatal
    /// condition.
    fn classify(&self, photo: &PhotoInfo) -> anyhow::Result<Vec<LabelScore>>;
}
