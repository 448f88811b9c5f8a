//! End-to-end tests for the one-shot operations
//!
//! These tests run against real files in a temporary directory.

#[path = "fixtures/mod.rs"]
mod fixtures;

use chrono::{TimeZone, Utc};
use exifkit::{
    add_exif, add_location_to_store, gps_location, orientation_degrees, read_exif,
    rotate_in_jpeg_exif, rotation_from_path, tag, write_file, ExifError, IfdGroup,
    JpegSegmentEditor, Location, SegmentError, TagStore, TagValue,
};
use fixtures::{camera_store, jfif_jpeg, jpeg_with_exif, write_fixture};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn add_exif_writes_a_single_date_time() {
    let time = Utc.with_ymd_and_hms(2014, 3, 9, 8, 5, 1).unwrap();
    let jpeg = add_exif(&jfif_jpeg(), &time).unwrap();

    let store = read_exif(&jpeg);
    let tags = store.all_tags();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id(), tag::DATE_TIME);
    assert_eq!(tags[0].group(), IfdGroup::Primary);
    assert_eq!(tags[0].value(), &TagValue::Ascii("2014:03:09 08:05:01".to_string()));
    assert!(!store.has_group(IfdGroup::Gps));

    // Everything after the new segment is the original stream
    let region = JpegSegmentEditor::locate_exif_segment(&jpeg).unwrap().region().unwrap();
    assert_eq!(&jpeg[region.end..], &jfif_jpeg()[2..]);
}

#[test]
fn rotate_rewrites_orientation_in_place() {
    let dir = TempDir::new().unwrap();
    let mut store = camera_store();
    store.set(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 6u16).unwrap());
    let original = jpeg_with_exif(&store);
    let path = write_fixture(dir.path(), "photo.jpg", &original);

    assert_eq!(rotation_from_path(&path), 90);
    rotate_in_jpeg_exif(&path, 270).unwrap();
    assert_eq!(rotation_from_path(&path), 270);

    let rewritten = std::fs::read(&path).unwrap();
    let before = JpegSegmentEditor::locate_exif_segment(&original).unwrap().region().unwrap();
    let after = JpegSegmentEditor::locate_exif_segment(&rewritten).unwrap().region().unwrap();
    assert_eq!(&rewritten[..after.start], &original[..before.start]);
    assert_eq!(&rewritten[after.end..], &original[before.end..]);

    // Only the orientation changed
    let mut expected = store.clone();
    expected.set(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 8u16).unwrap());
    assert_eq!(read_exif(&rewritten), expected);
}

#[test]
fn rotate_requires_existing_exif() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "plain.jpg", &jfif_jpeg());

    let result = rotate_in_jpeg_exif(&path, 90);
    assert!(matches!(
        result,
        Err(ExifError::Segment(SegmentError::NoExifSegment))
    ));
    assert_eq!(std::fs::read(&path).unwrap(), jfif_jpeg());
}

#[test]
fn rotate_rejects_odd_angles() {
    let dir = TempDir::new().unwrap();
    let original = jpeg_with_exif(&camera_store());
    let path = write_fixture(dir.path(), "photo.jpg", &original);

    assert!(matches!(
        rotate_in_jpeg_exif(&path, 45),
        Err(ExifError::UnsupportedRotation(45))
    ));
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

#[test]
fn rotation_from_missing_file_is_zero() {
    let dir = TempDir::new().unwrap();
    assert_eq!(rotation_from_path(dir.path().join("missing.jpg")), 0);
}

#[test]
fn write_file_reports_size() {
    let dir = TempDir::new().unwrap();

    let plain_path = dir.path().join("plain.jpg");
    let size = write_file(&plain_path, &jfif_jpeg(), None).unwrap();
    assert_eq!(size, jfif_jpeg().len() as u64);
    assert_eq!(std::fs::metadata(&plain_path).unwrap().len(), size);

    let store = camera_store();
    let tagged_path = dir.path().join("tagged.jpg");
    let size = write_file(&tagged_path, &jfif_jpeg(), Some(&store)).unwrap();
    assert_eq!(std::fs::metadata(&tagged_path).unwrap().len(), size);
    assert_eq!(read_exif(&std::fs::read(&tagged_path).unwrap()), store);

    assert!(write_file(dir.path().join("missing/dir.jpg"), &jfif_jpeg(), None).is_err());
}

#[test]
fn location_altitude_policy() {
    let time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let mut store = TagStore::new();
    let at_sea_level = Location {
        latitude: 51.5007,
        longitude: -0.1246,
        altitude: 0.0,
        time,
    };
    add_location_to_store(&mut store, &at_sea_level).unwrap();
    assert!(!store.contains(tag::GPS_ALTITUDE, IfdGroup::Gps));
    assert!(!store.contains(tag::GPS_ALTITUDE_REF, IfdGroup::Gps));

    let below = Location {
        altitude: -28.0,
        ..at_sea_level
    };
    add_location_to_store(&mut store, &below).unwrap();
    assert_eq!(store.get_int_value(tag::GPS_ALTITUDE_REF, IfdGroup::Gps), Some(1));

    let location = gps_location(&read_exif(&jpeg_with_exif(&store))).unwrap();
    assert_eq!(location.altitude, Some(-28.0));
    assert_eq!(location.timestamp, Some(time));
}

#[test]
fn camera_store_reads_back_from_jpeg() {
    let jpeg = jpeg_with_exif(&camera_store());
    let store = read_exif(&jpeg);
    assert_eq!(orientation_degrees(&store), 90);
    assert_eq!(store.thumbnail(), Some(&fixtures::minimal_jpeg()[..]));
}
