//! Filesystem adapter for loading product folders.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ColorType, ImageFormat, ImageReader};
use photo_pick_core::domain::{ColorMode, ContainerFormat, PhotoAttributes, PhotoInfo};
use photo_pick_core::ports::PhotoSource;
use tracing::debug;

/// Supported image extensions.
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// Photo source over one product folder.
///
/// Files are yielded in filename order so runs over the same folder are
/// deterministic.
pub struct FsPhotoSource {
    folder: PathBuf,
}

impl FsPhotoSource {
    /// Creates a source over the given folder.
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Collects the folder's photo files, sorted by filename.
    fn collect_files(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("cannot read folder {}: {err}", self.folder.display());
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_supported_photo(path))
            .collect();
        files.sort();
        files
    }
}

impl PhotoSource for FsPhotoSource {
    fn photos(&self) -> Box<dyn Iterator<Item = Result<PhotoInfo>> + Send + '_> {
        let files = self.collect_files();
        debug!("found {} photo files in {}", files.len(), self.folder.display());
        Box::new(files.into_iter().map(|path| load_photo(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported photo extension.
fn is_supported_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.as_str()))
}

/// Loads one photo and extracts its attributes.
fn load_photo(path: &Path) -> Result<PhotoInfo> {
    let file_size_bytes = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    let reader = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to probe format of {}", path.display()))?;
    let format = container_format(reader.format());
    let image = reader
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .with_context(|| format!("non-UTF-8 filename: {}", path.display()))?;

    Ok(PhotoInfo {
        path: path.to_string_lossy().into_owned(),
        filename,
        attributes: PhotoAttributes {
            width: image.width(),
            height: image.height(),
            file_size_bytes,
            color_mode: color_mode(image.color()),
            format,
        },
        image,
    })
}

fn color_mode(color: ColorType) -> ColorMode {
    match color {
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::Rgb,
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorMode::Rgba,
        _ => ColorMode::Other,
    }
}

fn container_format(format: Option<ImageFormat>) -> ContainerFormat {
    match format {
        Some(ImageFormat::Jpeg) => ContainerFormat::Jpeg,
        Some(ImageFormat::Png) => ContainerFormat::Png,
        _ => ContainerFormat::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_photo() {
        assert!(is_supported_photo(Path::new("test.jpg")));
        assert!(is_supported_photo(Path::new("test.JPEG")));
        assert!(is_supported_photo(Path::new("test.png")));
        assert!(is_supported_photo(Path::new("test.webp")));
        assert!(!is_supported_photo(Path::new("test.txt")));
        assert!(!is_supported_photo(Path::new("test.cr2")));
        assert!(!is_supported_photo(Path::new("test")));
    }

    #[test]
    fn test_container_format_mapping() {
        assert_eq!(
            container_format(Some(ImageFormat::Jpeg)),
            ContainerFormat::Jpeg
        );
        assert_eq!(
            container_format(Some(ImageFormat::Png)),
            ContainerFormat::Png
        );
        assert_eq!(
            container_format(Some(ImageFormat::Bmp)),
            ContainerFormat::Other
        );
        assert_eq!(container_format(None), ContainerFormat::Other);
    }

    #[test]
    fn test_color_mode_mapping() {
        assert_eq!(color_mode(ColorType::Rgb8), ColorMode::Rgb);
        assert_eq!(color_mode(ColorType::Rgba8), ColorMode::Rgba);
        assert_eq!(color_mode(ColorType::L8), ColorMode::Other);
    }
}
