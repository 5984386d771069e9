//! Photo attributes and scoring results.

use serde::{Deserialize, Serialize};

use super::LabelScore;

/// Color mode of a decoded image.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Plain RGB, the preferred mode for listing photos.
    Rgb,
    /// RGB with alpha channel.
    Rgba,
    /// Grayscale, palette or anything else.
    Other,
}

/// Container format the photo was stored in.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFormat {
    Jpeg,
    Png,
    Other,
}

/// Intrinsic attributes read from an image file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhotoAttributes {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// On-disk file size in bytes.
    pub file_size_bytes: u64,
    /// Decoded color mode.
    pub color_mode: ColorMode,
    /// Container format.
    pub format: ContainerFormat,
}

impl PhotoAttributes {
    /// Width-to-height ratio.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// File size in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// A loaded photo, ready for classification and scoring.
#[derive(Debug, Clone)]
pub struct PhotoInfo {
    /// Full path to the image file.
    pub path: String,
    /// Bare filename, used for deterministic tie-breaking and overrides.
    pub filename: String,
    /// Intrinsic attributes.
    pub attributes: PhotoAttributes,
    /// Decoded image data, consumed by the label provider.
    pub image: image::DynamicImage,
}

/// Coarse content classification of a photo.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Clearly shows the whole product.
    MainProduct,
    /// Shows the product, with weaker evidence.
    GoodProduct,
    /// Ambiguous or unclassified content.
    Mixed,
    /// Close-up of a component; never shippable as a listing photo.
    DetailsOnly,
}

impl ContentType {
    /// Classifies from the dominant-category score and the accumulated
    /// detail/negative penalty. Rules are evaluated in priority order.
    #[must_use]
    pub fn classify(dominant_score: f32, penalty: f32) -> Self {
        if dominant_score > 2.0 && penalty > -3.0 {
            Self::MainProduct
        } else if dominant_score > 1.0 && penalty > -2.0 {
            Self::GoodProduct
        } else if penalty < -3.0 {
            Self::DetailsOnly
        } else {
            Self::Mixed
        }
    }
}

/// Inferred camera angle relative to the product.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewpoint {
    Front,
    Back,
    Side,
    /// No label evidence was available.
    Unknown,
}

/// A fully scored photo. Created once by the scorer and read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPhoto {
    /// Bare filename.
    pub filename: String,
    /// Full path to the image file.
    pub path: String,
    /// Attributes the basic/technical scores were derived from.
    pub attributes: PhotoAttributes,
    /// Resolution, aspect ratio, color mode and format score, in `[0, 4]`.
    pub basic_score: f32,
    /// File size and compression quality score, in `[0, 2]`.
    pub technical_score: f32,
    /// Label-evidence content score, in `[0, 3.5]`.
    pub content_score: f32,
    /// Viewpoint score, in `[0, 2]`.
    pub viewpoint_score: f32,
    /// Composite score, in `[0, 10]`.
    pub final_score: f32,
    /// Coarse content bucket.
    pub content_type: ContentType,
    /// Inferred viewpoint.
    pub main_view: Viewpoint,
    /// Top label evidence this photo was scored from.
    pub labels: Vec<LabelScore>,
    /// Categories whose primary keywords matched, sorted and deduplicated.
    pub primary_categories: Vec<String>,
}

impl ScoredPhoto {
    /// Whether this photo shows the product well enough to lead a listing.
    #[must_use]
    pub fn is_main_product(&self) -> bool {
        matches!(
            self.content_type,
            ContentType::MainProduct | ContentType::GoodProduct
        )
    }

    /// Whether this photo is a details-only close-up.
    #[must_use]
    pub fn is_details_only(&self) -> bool {
        self.content_type == ContentType::DetailsOnly
    }

    /// Whether the photo was classified as a front view.
    #[must_use]
    pub fn is_front_view(&self) -> bool {
        self.main_view == Viewpoint::Front
    }

    /// Whether the photo was classified as a back view.
    #[must_use]
    pub fn is_back_view(&self) -> bool {
        self.main_view == Viewpoint::Back
    }

    /// Whether every primary-keyword match belongs to at most one category.
    /// Clean photos are strictly preferred as the lead image.
    #[must_use]
    pub fn is_single_category(&self) -> bool {
        self.primary_categories.len() <= 1
    }
}
