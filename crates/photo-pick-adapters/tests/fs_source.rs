//! Folder scanning and attribute extraction against a real filesystem.

use std::fs;

use image::{RgbImage, RgbaImage};
use photo_pick_adapters::FsPhotoSource;
use photo_pick_core::domain::{ColorMode, ContainerFormat};
use photo_pick_core::ports::PhotoSource;
use tempfile::TempDir;

fn folder_with_photos() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    RgbImage::new(64, 48)
        .save(dir.path().join("b_photo.jpg"))
        .expect("write jpg");
    RgbaImage::new(32, 32)
        .save(dir.path().join("a_photo.png"))
        .expect("write png");
    fs::write(dir.path().join("notes.txt"), "not a photo").expect("write txt");
    fs::create_dir(dir.path().join("subdir")).expect("mkdir");
    dir
}

#[test]
fn test_scans_only_supported_photos_in_filename_order() {
    let dir = folder_with_photos();
    let source = FsPhotoSource::new(dir.path());

    assert_eq!(source.count_hint(), Some(2));
    let photos: Vec<_> = source
        .photos()
        .collect::<Result<Vec<_>, _>>()
        .expect("all readable");
    let names: Vec<_> = photos.iter().map(|p| p.filename.as_str()).collect();
    assert_eq!(names, vec!["a_photo.png", "b_photo.jpg"]);
}

#[test]
fn test_extracts_attributes() {
    let dir = folder_with_photos();
    let source = FsPhotoSource::new(dir.path());
    let photos: Vec<_> = source
        .photos()
        .collect::<Result<Vec<_>, _>>()
        .expect("all readable");

    let png = &photos[0];
    assert_eq!(png.attributes.width, 32);
    assert_eq!(png.attributes.height, 32);
    assert_eq!(png.attributes.format, ContainerFormat::Png);
    assert_eq!(png.attributes.color_mode, ColorMode::Rgba);
    assert!(png.attributes.file_size_bytes > 0);

    let jpg = &photos[1];
    assert_eq!(jpg.attributes.width, 64);
    assert_eq!(jpg.attributes.height, 48);
    assert_eq!(jpg.attributes.format, ContainerFormat::Jpeg);
    assert_eq!(jpg.attributes.color_mode, ColorMode::Rgb);
}

#[test]
fn test_corrupt_photo_yields_err_item() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg").expect("write");
    RgbImage::new(16, 16)
        .save(dir.path().join("ok.jpg"))
        .expect("write jpg");

    let source = FsPhotoSource::new(dir.path());
    let items: Vec<_> = source.photos().collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_err());
    assert!(items[1].is_ok());
}

#[test]
fn test_missing_folder_yields_nothing() {
    let source = FsPhotoSource::new("/nonexistent/folder");
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.photos().count(), 0);
}
