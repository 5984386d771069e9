//! Multi-factor photo scorer.
//!
//! Combines intrinsic image attributes with classifier label evidence into
//! four capped sub-scores and one composite score. Pure function of its
//! inputs; safe to run per photo in any order or in parallel.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::{
    top_labels, CategoryRuleSet, ColorMode, ContainerFormat, ContentType, LabelScore,
    PhotoAttributes, PhotoInfo, ScoredPhoto, Viewpoint,
};

/// Sub-score caps and fixed bonuses.
mod caps {
    pub const BASIC_MAX: f32 = 4.0;
    pub const TECHNICAL_MAX: f32 = 2.0;
    pub const CONTENT_MAX: f32 = 3.5;
    pub const FINAL_MAX: f32 = 10.0;
    /// Content/viewpoint score when no label evidence is available: the
    /// composite stays representative of the measurable properties instead
    /// of collapsing to the technical floor.
    pub const DEGRADED: f32 = 1.0;
}

/// Fraction of a secondary-keyword weight credited to the leading category.
const SECONDARY_CREDIT: f32 = 0.3;

/// Accumulated content evidence for one photo.
struct ContentSignal {
    /// Positive evidence per category.
    category_scores: BTreeMap<String, f32>,
    /// Summed detail/negative penalties (non-positive).
    penalty: f32,
    /// Categories with at least one primary-keyword match.
    matched_primary: BTreeSet<String>,
}

impl ContentSignal {
    fn new() -> Self {
        Self {
            category_scores: BTreeMap::new(),
            penalty: 0.0,
            matched_primary: BTreeSet::new(),
        }
    }

    /// The currently leading category, ties resolved by name order.
    fn leader(&self) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for (name, score) in &self.category_scores {
            match best {
                Some((_, s)) if *score <= s => {}
                _ => best = Some((name.as_str(), *score)),
            }
        }
        best.map(|(name, _)| name)
    }

    fn dominant_score(&self) -> f32 {
        self.category_scores
            .values()
            .fold(0.0_f32, |acc, s| acc.max(*s))
    }
}

/// Scores one photo from its attributes and label evidence.
pub struct PhotoScorer<'a> {
    rules: &'a CategoryRuleSet,
}

impl<'a> PhotoScorer<'a> {
    /// Creates a scorer over the given rule set.
    #[must_use]
    pub const fn new(rules: &'a CategoryRuleSet) -> Self {
        Self { rules }
    }

    /// Scores a photo. `labels` is `None` when the label provider failed
    /// for this photo; the content and viewpoint scores then degrade to a
    /// minimal baseline instead of failing the photo.
    #[must_use]
    pub fn score(&self, info: &PhotoInfo, labels: Option<&[LabelScore]>) -> ScoredPhoto {
        let basic_score = basic_score(&info.attributes);
        let technical_score = technical_score(&info.attributes);

        let (content_score, content_type, main_view, viewpoint_score, matched, kept_labels) =
            match labels {
                Some(labels) => {
                    let top = top_labels(labels);
                    let signal = self.content_signal(top);
                    let dominant = signal.dominant_score();
                    let content = (dominant + signal.penalty).clamp(0.0, caps::CONTENT_MAX);
                    let content_type = ContentType::classify(dominant, signal.penalty);
                    let (view, view_score) = self.viewpoint(top);
                    (
                        content,
                        content_type,
                        view,
                        view_score,
                        signal.matched_primary,
                        top.to_vec(),
                    )
                }
                None => {
                    debug!(
                        "no label evidence for {}, scoring content and viewpoint at baseline",
                        info.filename
                    );
                    (
                        caps::DEGRADED,
                        ContentType::Mixed,
                        Viewpoint::Unknown,
                        caps::DEGRADED,
                        BTreeSet::new(),
                        Vec::new(),
                    )
                }
            };

        let final_score =
            (basic_score + technical_score + content_score + viewpoint_score).min(caps::FINAL_MAX);

        ScoredPhoto {
            filename: info.filename.clone(),
            path: info.path.clone(),
            attributes: info.attributes,
            basic_score,
            technical_score,
            content_score,
            viewpoint_score,
            final_score,
            content_type,
            main_view,
            labels: kept_labels,
            primary_categories: matched.into_iter().collect(),
        }
    }

    /// Accumulates positive and penalty evidence over the top labels.
    ///
    /// Each label credits at most one positive bucket (first primary match
    /// across the categories wins; otherwise a secondary cue reinforces the
    /// currently leading category) and at most one penalty bucket (details
    /// before negatives).
    fn content_signal(&self, labels: &[LabelScore]) -> ContentSignal {
        let mut signal = ContentSignal::new();

        for entry in labels {
            let label = entry.label.to_lowercase();

            let mut credited = false;
            for (name, category) in &self.rules.categories {
                if let Some(weight) = CategoryRuleSet::first_match(&category.primary, &label) {
                    *signal.category_scores.entry(name.clone()).or_insert(0.0) +=
                        entry.confidence * weight;
                    signal.matched_primary.insert(name.clone());
                    credited = true;
                    break;
                }
            }
            if !credited {
                if let Some(leader) = signal.leader().map(str::to_string) {
                    if let Some(category) = self.rules.get(&leader) {
                        if let Some(weight) =
                            CategoryRuleSet::first_match(&category.secondary, &label)
                        {
                            if let Some(score) = signal.category_scores.get_mut(&leader) {
                                *score += entry.confidence * weight * SECONDARY_CREDIT;
                            }
                        }
                    }
                }
            }

            // Penalties carry their raw weight: a close-up of a buckle is a
            // close-up no matter how confident the classifier was.
            let mut penalized = false;
            for category in self.rules.categories.values() {
                if let Some(weight) = CategoryRuleSet::first_match(&category.details, &label) {
                    signal.penalty += weight;
                    penalized = true;
                    break;
                }
            }
            if !penalized {
                for category in self.rules.categories.values() {
                    if let Some(weight) = CategoryRuleSet::first_match(&category.negative, &label) {
                        signal.penalty += weight;
                        break;
                    }
                }
            }
        }

        signal
    }

    /// Accumulates viewpoint cues and classifies the camera angle.
    fn viewpoint(&self, labels: &[LabelScore]) -> (Viewpoint, f32) {
        let mut front = 0.0_f32;
        let mut back = 0.0_f32;

        for entry in labels {
            let label = entry.label.to_lowercase();
            if let Some(weight) = CategoryRuleSet::first_match(&self.rules.front_view, &label) {
                front += entry.confidence * weight;
            }
            if let Some(weight) = CategoryRuleSet::first_match(&self.rules.back_view, &label) {
                back += weight;
            }
        }

        let view = if front > 1.0 && front > back.abs() * 1.5 {
            Viewpoint::Front
        } else if back < -2.0 {
            Viewpoint::Back
        } else {
            Viewpoint::Side
        };

        let score = match view {
            Viewpoint::Front => 2.0,
            Viewpoint::Back => 0.0,
            Viewpoint::Side | Viewpoint::Unknown => 1.0,
        };

        (view, score)
    }
}

/// Resolution, aspect ratio, color mode and container format, capped at 4.0.
fn basic_score(attrs: &PhotoAttributes) -> f32 {
    let mut score = 0.0_f32;

    if attrs.width >= 800 && attrs.height >= 800 {
        score += 2.0;
    }
    if attrs.width >= 1200 && attrs.height >= 1200 {
        score += 1.0;
    }
    if attrs.width >= 1920 && attrs.height >= 1920 {
        score += 1.0;
    }

    let aspect = attrs.aspect_ratio();
    score += if (0.9..=1.1).contains(&aspect) {
        1.0 // near-square, ideal for listing thumbnails
    } else if (1.2..=1.5).contains(&aspect) {
        0.8
    } else if (0.6..=0.9).contains(&aspect) {
        0.7
    } else {
        0.3
    };

    score += match attrs.color_mode {
        ColorMode::Rgb => 1.0,
        ColorMode::Rgba => 0.8,
        ColorMode::Other => 0.5,
    };

    score += match attrs.format {
        ContainerFormat::Jpeg | ContainerFormat::Png => 1.0,
        ContainerFormat::Other => 0.5,
    };

    score.min(caps::BASIC_MAX)
}

/// File size band and compression quality, capped at 2.0.
#[allow(clippy::cast_precision_loss)]
fn technical_score(attrs: &PhotoAttributes) -> f32 {
    let mut score = 0.0_f32;

    let mb = attrs.size_mb();
    score += if (0.1..=2.0).contains(&mb) {
        1.0
    } else if (0.05..=5.0).contains(&mb) {
        0.8
    } else {
        0.3
    };

    // Pixels-per-byte within an empirical band signals sane JPEG compression.
    if attrs.file_size_bytes > 0 {
        let pixels = f64::from(attrs.width) * f64::from(attrs.height);
        let ratio = pixels / attrs.file_size_bytes as f64;
        score += if (100.0..=1000.0).contains(&ratio) {
            1.0
        } else {
            0.5
        };
    } else {
        score += 0.5;
    }

    score.min(caps::TECHNICAL_MAX)
}
