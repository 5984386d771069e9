//! Builders for photos and scored photos.

use image::DynamicImage;
use photo_pick_core::domain::{
    ColorMode, ContainerFormat, ContentType, LabelScore, PhotoAttributes, PhotoInfo, ScoredPhoto,
    Viewpoint,
};

/// Builder for a loaded photo with controllable attributes.
///
/// The decoded pixel data is a synthetic RGB image of the requested
/// dimensions; attribute-driven scoring never looks at the pixels, only
/// adapters and classifiers do.
pub struct PhotoBuilder {
    filename: String,
    width: u32,
    height: u32,
    file_size_bytes: u64,
    color_mode: ColorMode,
    format: ContainerFormat,
}

impl PhotoBuilder {
    /// Starts a builder for a photo with listing-friendly defaults:
    /// 1200x1200 RGB JPEG, 300 KiB on disk.
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            width: 1200,
            height: 1200,
            file_size_bytes: 300 * 1024,
            color_mode: ColorMode::Rgb,
            format: ContainerFormat::Jpeg,
        }
    }

    /// Sets the pixel dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the on-disk file size in bytes.
    #[must_use]
    pub fn file_size(mut self, bytes: u64) -> Self {
        self.file_size_bytes = bytes;
        self
    }

    /// Sets the color mode.
    #[must_use]
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Sets the container format.
    #[must_use]
    pub fn format(mut self, format: ContainerFormat) -> Self {
        self.format = format;
        self
    }

    /// Builds the photo.
    #[must_use]
    pub fn build(self) -> PhotoInfo {
        // Keep the synthetic pixel buffer small; attributes carry the
        // claimed dimensions.
        let image = DynamicImage::new_rgb8(self.width.min(8), self.height.min(8));
        PhotoInfo {
            path: format!("synthetic://{}", self.filename),
            filename: self.filename,
            attributes: PhotoAttributes {
                width: self.width,
                height: self.height,
                file_size_bytes: self.file_size_bytes,
                color_mode: self.color_mode,
                format: self.format,
            },
            image,
        }
    }
}

/// Builder for scored photos, for testing partitioning and selection
/// without running the scorer.
pub struct ScoredPhotoBuilder {
    photo: ScoredPhoto,
}

impl ScoredPhotoBuilder {
    /// Starts a builder with a mid-range `Mixed` side-view photo.
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            photo: ScoredPhoto {
                path: format!("synthetic://{filename}"),
                filename,
                attributes: PhotoAttributes {
                    width: 1200,
                    height: 1200,
                    file_size_bytes: 300 * 1024,
                    color_mode: ColorMode::Rgb,
                    format: ContainerFormat::Jpeg,
                },
                basic_score: 3.0,
                technical_score: 1.5,
                content_score: 2.5,
                viewpoint_score: 1.0,
                final_score: 8.0,
                content_type: ContentType::Mixed,
                main_view: Viewpoint::Side,
                labels: Vec::new(),
                primary_categories: Vec::new(),
            },
        }
    }

    /// Sets the content bucket.
    #[must_use]
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.photo.content_type = content_type;
        self
    }

    /// Sets the viewpoint and the matching viewpoint score.
    #[must_use]
    pub fn viewpoint(mut self, viewpoint: Viewpoint) -> Self {
        self.photo.main_view = viewpoint;
        self.photo.viewpoint_score = match viewpoint {
            Viewpoint::Front => 2.0,
            Viewpoint::Back => 0.0,
            _ => 1.0,
        };
        self
    }

    /// Sets the categories whose primary keywords matched.
    #[must_use]
    pub fn primary_categories(mut self, categories: &[&str]) -> Self {
        self.photo.primary_categories = categories.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the content and composite scores.
    #[must_use]
    pub fn scores(mut self, content_score: f32, final_score: f32) -> Self {
        self.photo.content_score = content_score;
        self.photo.final_score = final_score;
        self
    }

    /// Sets the label evidence.
    #[must_use]
    pub fn labels(mut self, labels: &[(&str, f32)]) -> Self {
        self.photo.labels = labels
            .iter()
            .map(|(label, confidence)| LabelScore {
                label: (*label).to_string(),
                confidence: *confidence,
            })
            .collect();
        self
    }

    /// Builds the scored photo.
    #[must_use]
    pub fn build(self) -> ScoredPhoto {
        self.photo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_builder_defaults() {
        let photo = PhotoBuilder::new("a.jpg").build();
        assert_eq!(photo.filename, "a.jpg");
        assert_eq!(photo.attributes.width, 1200);
        assert_eq!(photo.attributes.color_mode, ColorMode::Rgb);
        assert_eq!(photo.attributes.format, ContainerFormat::Jpeg);
    }

    #[test]
    fn test_photo_builder_overrides() {
        let photo = PhotoBuilder::new("b.png")
            .dimensions(640, 480)
            .file_size(50 * 1024)
            .format(ContainerFormat::Png)
            .build();
        assert_eq!(photo.attributes.width, 640);
        assert_eq!(photo.attributes.height, 480);
        assert_eq!(photo.attributes.file_size_bytes, 50 * 1024);
        assert_eq!(photo.attributes.format, ContainerFormat::Png);
    }

    #[test]
    fn test_scored_builder_viewpoint_sets_score() {
        let front = ScoredPhotoBuilder::new("f.jpg")
            .viewpoint(Viewpoint::Front)
            .build();
        assert_eq!(front.main_view, Viewpoint::Front);
        assert!((front.viewpoint_score - 2.0).abs() < f32::EPSILON);

        let back = ScoredPhotoBuilder::new("b.jpg")
            .viewpoint(Viewpoint::Back)
            .build();
        assert!((back.viewpoint_score).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scored_builder_categories() {
        let photo = ScoredPhotoBuilder::new("c.jpg")
            .primary_categories(&["bags", "shoes"])
            .build();
        assert!(!photo.is_single_category());
    }
}
