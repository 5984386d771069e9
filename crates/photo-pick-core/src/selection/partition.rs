//! Splits a scored batch into disjoint selection buckets.

use crate::domain::{ContentType, ScoredPhoto};

/// Disjoint content-type buckets over a scored batch.
///
/// The main-product bucket is further split by category purity: a photo
/// whose primary-keyword matches all belong to one category is strictly
/// preferred as the lead image over one mixing categories.
#[derive(Debug, Default)]
pub struct Candidates<'a> {
    /// `MainProduct` photos with single-category evidence.
    pub clean_main: Vec<&'a ScoredPhoto>,
    /// `MainProduct` photos with cross-category evidence.
    pub cross_main: Vec<&'a ScoredPhoto>,
    /// `GoodProduct` photos.
    pub good: Vec<&'a ScoredPhoto>,
    /// `Mixed` photos, eligible only for backfill.
    pub mixed: Vec<&'a ScoredPhoto>,
    /// `DetailsOnly` photos, never selectable.
    pub details: Vec<&'a ScoredPhoto>,
}

impl<'a> Candidates<'a> {
    /// Partitions `photos` by content type. Every photo lands in exactly
    /// one bucket.
    #[must_use]
    pub fn partition(photos: &'a [ScoredPhoto]) -> Self {
        let mut candidates = Self::default();
        for photo in photos {
            match photo.content_type {
                ContentType::MainProduct => {
                    if photo.is_single_category() {
                        candidates.clean_main.push(photo);
                    } else {
                        candidates.cross_main.push(photo);
                    }
                }
                ContentType::GoodProduct => candidates.good.push(photo),
                ContentType::Mixed => candidates.mixed.push(photo),
                ContentType::DetailsOnly => candidates.details.push(photo),
            }
        }
        candidates
    }

    /// Total number of selectable photos.
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.clean_main.len() + self.cross_main.len() + self.good.len() + self.mixed.len()
    }
}

#[cfg(test)]
mod tests {
    use photo_pick_core::domain::ContentType;
    use photo_pick_core::selection::Candidates;
    use photo_pick_test_support::ScoredPhotoBuilder;

    #[test]
    fn test_buckets_are_disjoint_and_complete() {
        let photos = vec![
            ScoredPhotoBuilder::new("a.jpg")
                .content_type(ContentType::MainProduct)
                .primary_categories(&["bags"])
                .build(),
            ScoredPhotoBuilder::new("b.jpg")
                .content_type(ContentType::MainProduct)
                .primary_categories(&["bags", "shoes"])
                .build(),
            ScoredPhotoBuilder::new("c.jpg")
                .content_type(ContentType::GoodProduct)
                .build(),
            ScoredPhotoBuilder::new("d.jpg")
                .content_type(ContentType::Mixed)
                .build(),
            ScoredPhotoBuilder::new("e.jpg")
                .content_type(ContentType::DetailsOnly)
                .build(),
        ];

        let candidates = Candidates::partition(&photos);
        assert_eq!(candidates.clean_main.len(), 1);
        assert_eq!(candidates.cross_main.len(), 1);
        assert_eq!(candidates.good.len(), 1);
        assert_eq!(candidates.mixed.len(), 1);
        assert_eq!(candidates.details.len(), 1);
        assert_eq!(candidates.eligible_count(), 4);
    }

    #[test]
    fn test_no_primary_matches_counts_as_clean() {
        let photos = vec![ScoredPhotoBuilder::new("a.jpg")
            .content_type(ContentType::MainProduct)
            .build()];
        let candidates = Candidates::partition(&photos);
        assert_eq!(candidates.clean_main.len(), 1);
    }
}
