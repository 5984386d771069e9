//! Final selection of the listing photos.
//!
//! Picks `num_best` photos honoring the bucket priority order, category
//! ordering preferences and the hard details-only exclusion. Every ranking
//! ends in filename order, so identical inputs always produce identical
//! output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, info};

use super::Candidates;
use crate::domain::ScoredPhoto;

/// Per-folder manual pinning: `folder_key → slot (1-based) → filename`.
/// Slot keys are strings so the table deserializes straight from TOML.
///
/// Deployment policy, not algorithm: an override is honored only when the
/// named file is actually present in the slot's eligible bucket, otherwise
/// the standard ranking applies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SelectionOverrides(pub BTreeMap<String, BTreeMap<String, String>>);

impl SelectionOverrides {
    /// Returns the pinned filename for `folder_key` and 1-based `slot`.
    #[must_use]
    pub fn pinned(&self, folder_key: &str, slot: usize) -> Option<&str> {
        self.0
            .get(folder_key)
            .and_then(|slots| slots.get(&slot.to_string()))
            .map(String::as_str)
    }

    /// Adds one pinned slot; used by configuration loading and tests.
    pub fn pin(
        &mut self,
        folder_key: impl Into<String>,
        slot: usize,
        filename: impl Into<String>,
    ) {
        self.0
            .entry(folder_key.into())
            .or_default()
            .insert(slot.to_string(), filename.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lead-photo ranking: viewpoint dominates, then content purity, then the
/// composite score.
fn rank_lead(a: &ScoredPhoto, b: &ScoredPhoto) -> Ordering {
    b.viewpoint_score
        .total_cmp(&a.viewpoint_score)
        .then(b.content_score.total_cmp(&a.content_score))
        .then(b.final_score.total_cmp(&a.final_score))
        .then_with(|| a.filename.cmp(&b.filename))
}

/// Secondary-slot ranking: content purity first, the secondary shot is
/// allowed more viewpoint variety.
fn rank_secondary(a: &ScoredPhoto, b: &ScoredPhoto) -> Ordering {
    b.content_score
        .total_cmp(&a.content_score)
        .then(b.final_score.total_cmp(&a.final_score))
        .then(b.viewpoint_score.total_cmp(&a.viewpoint_score))
        .then_with(|| a.filename.cmp(&b.filename))
}

/// Backfill ranking by composite score alone.
fn rank_final(a: &ScoredPhoto, b: &ScoredPhoto) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| a.filename.cmp(&b.filename))
}

/// Selects up to `num_best` photos from a scored batch.
///
/// Details-only photos are never selected; when the eligible pool runs out
/// the result is simply shorter than `num_best`.
#[must_use]
pub fn select_best(
    photos: &[ScoredPhoto],
    num_best: usize,
    folder_key: &str,
    overrides: &SelectionOverrides,
) -> Vec<ScoredPhoto> {
    let candidates = Candidates::partition(photos);
    debug!(
        "candidates: {} clean main, {} cross main, {} good, {} mixed, {} details-only",
        candidates.clean_main.len(),
        candidates.cross_main.len(),
        candidates.good.len(),
        candidates.mixed.len(),
        candidates.details.len(),
    );

    let mut selected: Vec<&ScoredPhoto> = Vec::new();

    // Slot 1: the lead photo. Eligible bucket is the main-product
    // equivalents; clean single-category photos first.
    let lead_pool: Vec<&ScoredPhoto> = candidates
        .clean_main
        .iter()
        .chain(&candidates.cross_main)
        .chain(&candidates.good)
        .copied()
        .collect();

    if num_best > 0 {
        let pinned = overrides
            .pinned(folder_key, 1)
            .and_then(|name| lead_pool.iter().find(|p| p.filename == name).copied());
        let lead = pinned.or_else(|| {
            best_by(&candidates.clean_main, &selected, rank_lead)
                .or_else(|| best_by(&candidates.cross_main, &selected, rank_lead))
                .or_else(|| best_by(&candidates.good, &selected, rank_lead))
        });
        if let Some(photo) = lead {
            info!(
                "lead photo: {} ({:.2}/10, {:?}, {:?})",
                photo.filename, photo.final_score, photo.content_type, photo.main_view
            );
            selected.push(photo);
        }
    }

    // Slots 2..: remaining main-product equivalents, then mixed backfill.
    while selected.len() < num_best {
        let slot = selected.len() + 1;
        let pinned = overrides.pinned(folder_key, slot).and_then(|name| {
            lead_pool
                .iter()
                .chain(candidates.mixed.iter())
                .find(|p| p.filename == name && !selected.iter().any(|s| s.filename == name))
                .copied()
        });

        let next = pinned
            .or_else(|| best_by(&lead_pool, &selected, rank_secondary))
            .or_else(|| best_by(&candidates.mixed, &selected, rank_final));

        match next {
            Some(photo) => {
                debug!("slot {}: {} ({:.2}/10)", slot, photo.filename, photo.final_score);
                selected.push(photo);
            }
            None => {
                info!(
                    "only {} of {} requested photos are eligible, returning a short list",
                    selected.len(),
                    num_best
                );
                break;
            }
        }
    }

    selected.into_iter().cloned().collect()
}

/// The best unselected photo from `pool` under `rank`.
fn best_by<'a>(
    pool: &[&'a ScoredPhoto],
    selected: &[&ScoredPhoto],
    rank: fn(&ScoredPhoto, &ScoredPhoto) -> Ordering,
) -> Option<&'a ScoredPhoto> {
    pool.iter()
        .filter(|p| !selected.iter().any(|s| s.filename == p.filename))
        .copied()
        .min_by(|a, b| rank(a, b))
}

#[cfg(test)]
mod tests {
    use photo_pick_core::domain::{ContentType, ScoredPhoto, Viewpoint};
    use photo_pick_core::selection::{select_best, SelectionOverrides};
    use photo_pick_test_support::ScoredPhotoBuilder;

    fn no_overrides() -> SelectionOverrides {
        SelectionOverrides::default()
    }

    #[test]
    fn test_front_view_clean_photo_leads() {
        let photos = vec![
            ScoredPhotoBuilder::new("a.jpg")
                .content_type(ContentType::MainProduct)
                .viewpoint(Viewpoint::Front)
                .primary_categories(&["bags"])
                .scores(3.0, 9.0)
                .build(),
            ScoredPhotoBuilder::new("b.jpg")
                .content_type(ContentType::MainProduct)
                .viewpoint(Viewpoint::Side)
                .primary_categories(&["bags"])
                .scores(3.5, 9.8)
                .build(),
            ScoredPhotoBuilder::new("c.jpg")
                .content_type(ContentType::DetailsOnly)
                .build(),
        ];

        let selected = select_best(&photos, 2, "1", &no_overrides());
        let names: Vec<_> = selected.iter().map(|p| p.filename.as_str()).collect();
        // A's front view outranks B's higher final score for the lead slot;
        // B fills slot 2; C is excluded.
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_details_only_never_selected() {
        let photos = vec![
            ScoredPhotoBuilder::new("d.jpg")
                .content_type(ContentType::DetailsOnly)
                .scores(3.5, 9.9)
                .build(),
            ScoredPhotoBuilder::new("e.jpg")
                .content_type(ContentType::DetailsOnly)
                .scores(3.5, 9.8)
                .build(),
        ];
        let selected = select_best(&photos, 2, "1", &no_overrides());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_short_list_when_pool_runs_out() {
        let photos = vec![
            ScoredPhotoBuilder::new("a.jpg")
                .content_type(ContentType::MainProduct)
                .build(),
            ScoredPhotoBuilder::new("b.jpg")
                .content_type(ContentType::DetailsOnly)
                .build(),
        ];
        let selected = select_best(&photos, 3, "1", &no_overrides());
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_clean_preferred_over_cross_category_lead() {
        let photos = vec![
            ScoredPhotoBuilder::new("cross.jpg")
                .content_type(ContentType::MainProduct)
                .primary_categories(&["bags", "shoes"])
                .viewpoint(Viewpoint::Front)
                .scores(3.5, 9.9)
                .build(),
            ScoredPhotoBuilder::new("clean.jpg")
                .content_type(ContentType::MainProduct)
                .primary_categories(&["bags"])
                .viewpoint(Viewpoint::Side)
                .scores(2.5, 8.0)
                .build(),
        ];
        let selected = select_best(&photos, 1, "1", &no_overrides());
        assert_eq!(selected[0].filename, "clean.jpg");
    }

    #[test]
    fn test_good_product_fallback_lead() {
        let photos = vec![
            ScoredPhotoBuilder::new("good.jpg")
                .content_type(ContentType::GoodProduct)
                .scores(1.5, 7.0)
                .build(),
            ScoredPhotoBuilder::new("mixed.jpg")
                .content_type(ContentType::Mixed)
                .scores(0.5, 8.0)
                .build(),
        ];
        let selected = select_best(&photos, 2, "1", &no_overrides());
        let names: Vec<_> = selected.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["good.jpg", "mixed.jpg"]);
    }

    #[test]
    fn test_mixed_backfill_ranked_by_final_score() {
        let photos = vec![
            ScoredPhotoBuilder::new("m1.jpg")
                .content_type(ContentType::Mixed)
                .scores(0.5, 6.0)
                .build(),
            ScoredPhotoBuilder::new("m2.jpg")
                .content_type(ContentType::Mixed)
                .scores(0.9, 7.5)
                .build(),
        ];
        let selected = select_best(&photos, 1, "1", &no_overrides());
        assert_eq!(selected[0].filename, "m2.jpg");
    }

    #[test]
    fn test_filename_breaks_exact_ties() {
        let make = |name: &str| {
            ScoredPhotoBuilder::new(name)
                .content_type(ContentType::MainProduct)
                .primary_categories(&["bags"])
                .viewpoint(Viewpoint::Side)
                .scores(3.0, 9.0)
                .build()
        };
        let photos = vec![make("b.jpg"), make("a.jpg"), make("c.jpg")];
        let selected = select_best(&photos, 2, "1", &no_overrides());
        let names: Vec<_> = selected.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let photos: Vec<_> = (0..6)
            .map(|i| {
                ScoredPhotoBuilder::new(format!("img_{i}.jpg"))
                    .content_type(if i % 2 == 0 {
                        ContentType::MainProduct
                    } else {
                        ContentType::Mixed
                    })
                    .scores(1.0 + i as f32 * 0.3, 5.0 + i as f32 * 0.5)
                    .build()
            })
            .collect();

        let first = select_best(&photos, 2, "1", &no_overrides());
        let second = select_best(&photos, 2, "1", &no_overrides());
        let names = |sel: &[ScoredPhoto]| {
            sel.iter().map(|p| p.filename.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_override_pins_lead_when_present() {
        let photos = vec![
            ScoredPhotoBuilder::new("image_005.jpg")
                .content_type(ContentType::MainProduct)
                .scores(2.5, 8.0)
                .build(),
            ScoredPhotoBuilder::new("image_001.jpg")
                .content_type(ContentType::MainProduct)
                .viewpoint(Viewpoint::Front)
                .scores(3.5, 9.9)
                .build(),
        ];
        let mut overrides = SelectionOverrides::default();
        overrides.pin("2", 1, "image_005.jpg");

        let selected = select_best(&photos, 2, "2", &overrides);
        assert_eq!(selected[0].filename, "image_005.jpg");
        // Other folders keep the standard ranking.
        let selected = select_best(&photos, 2, "7", &overrides);
        assert_eq!(selected[0].filename, "image_001.jpg");
    }

    #[test]
    fn test_overrides_parse_from_toml() {
        let overrides: SelectionOverrides = toml::from_str(
            r#"
["2"]
1 = "image_006.jpg"
2 = "image_004.jpg"
"#,
        )
        .expect("parse overrides");
        assert_eq!(overrides.pinned("2", 1), Some("image_006.jpg"));
        assert_eq!(overrides.pinned("2", 2), Some("image_004.jpg"));
        assert_eq!(overrides.pinned("3", 1), None);
    }

    #[test]
    fn test_override_ignored_when_file_not_eligible() {
        let photos = vec![
            ScoredPhotoBuilder::new("detail.jpg")
                .content_type(ContentType::DetailsOnly)
                .build(),
            ScoredPhotoBuilder::new("main.jpg")
                .content_type(ContentType::MainProduct)
                .build(),
        ];
        let mut overrides = SelectionOverrides::default();
        overrides.pin("1", 1, "detail.jpg");

        let selected = select_best(&photos, 1, "1", &overrides);
        assert_eq!(selected[0].filename, "main.jpg");
    }
}
