use mediaseed::errors::FixtureError;
use mediaseed::{add_exif_comment, read_user_comment};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path) {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
    img.save_with_format(path, image::ImageFormat::Jpeg)
        .expect("write jpeg fixture");
}

#[test]
fn stamp_round_trips_through_kamadak_reader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.jpg");
    write_jpeg(&path);

    assert_eq!(read_user_comment(&path).unwrap(), None);
    add_exif_comment(&path).unwrap();

    let comment = read_user_comment(&path).unwrap().expect("comment present");
    assert_eq!(comment, path.to_string_lossy());
}

#[test]
fn stamped_file_still_decodes_as_jpeg() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.jpg");
    write_jpeg(&path);

    add_exif_comment(&path).unwrap();
    let decoded = image::open(&path).expect("stamped jpeg still decodes");
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn restamping_replaces_rather_than_accumulates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.jpg");
    write_jpeg(&path);

    add_exif_comment(&path).unwrap();
    let once = fs::metadata(&path).unwrap().len();
    add_exif_comment(&path).unwrap();
    let twice = fs::metadata(&path).unwrap().len();

    assert_eq!(once, twice, "second stamp must replace the first segment");
    let comment = read_user_comment(&path).unwrap().expect("comment present");
    assert_eq!(comment, path.to_string_lossy());
}

#[test]
fn non_jpeg_is_unsupported() {
    let dir = TempDir::new().unwrap();

    let png = dir.path().join("image.png");
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
    img.save_with_format(&png, image::ImageFormat::Png).unwrap();
    let err = add_exif_comment(&png).unwrap_err();
    assert!(matches!(err, FixtureError::UnsupportedFormat { .. }));

    let text = dir.path().join("notes.txt");
    fs::write(&text, b"plain text").unwrap();
    let err = add_exif_comment(&text).unwrap_err();
    assert!(matches!(err, FixtureError::UnsupportedFormat { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = add_exif_comment("no/such/photo.jpg").unwrap_err();
    assert!(matches!(err, FixtureError::Io { .. }));
}
