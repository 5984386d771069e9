//! Photo source port for loading photos from a folder.

use crate::domain::PhotoInfo;

/// Port for loading the photos of one product folder.
pub trait PhotoSource: Send + Sync {
    /// Returns an iterator over the folder's photos.
    ///
    /// # Errors
    ///
    /// Individual items are errors when a file cannot be read or decoded;
    /// the engine skips those photos and continues.
    fn photos(&self) -> Box<dyn Iterator<Item = anyhow::Result<PhotoInfo>> + Send + '_>;

    /// Returns the total number of photos, if known.
    fn count_hint(&self) -> Option<usize>;
}
