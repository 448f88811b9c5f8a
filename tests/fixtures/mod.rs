//! Synthetic JPEG fixtures built in code
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use exifkit::{
    add_location, set_orientation, tag, IfdGroup, JpegSegmentEditor, Rational, TagStore,
};
use std::path::{Path, PathBuf};

/// SOI + EOI
pub fn minimal_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

/// A JFIF-style JPEG without EXIF: APP0, a quantization table, a frame
/// header, a scan with stuffed bytes and a trailing EOI
pub fn jfif_jpeg() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];
    // APP0 JFIF 1.01, no thumbnail
    jpeg.extend_from_slice(&[
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00,
    ]);
    // DQT with a short dummy table
    jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x07, 0x00, 0x10, 0x0B, 0x0C, 0x0E]);
    // SOF0: 8-bit, 16x8, one component
    jpeg.extend_from_slice(&[
        0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x08, 0x00, 0x10, 0x01, 0x01, 0x11, 0x00,
    ]);
    // SOS followed by entropy-coded data with a stuffed 0xFF and a restart marker
    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    jpeg.extend_from_slice(&[0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56, 0x78]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// A store resembling what a phone camera writes
pub fn camera_store() -> TagStore {
    let mut store = TagStore::new();
    let set = |store: &mut TagStore, id, group, value: exifkit::TagValue| {
        store.set(TagStore::build(id, group, value).unwrap());
    };

    set(&mut store, tag::MAKE, IfdGroup::Primary, "Google".into());
    set(&mut store, tag::MODEL, IfdGroup::Primary, "Pixel 8".into());
    set(&mut store, tag::DATE_TIME, IfdGroup::Primary, "2024:05:01 12:30:00".into());
    set(&mut store, tag::X_RESOLUTION, IfdGroup::Primary, Rational::new(72, 1).into());
    set(&mut store, tag::Y_RESOLUTION, IfdGroup::Primary, Rational::new(72, 1).into());
    set(&mut store, tag::RESOLUTION_UNIT, IfdGroup::Primary, 2u16.into());
    set_orientation(&mut store, 90).unwrap();

    set(&mut store, tag::EXPOSURE_TIME, IfdGroup::Exif, Rational::new(1, 120).into());
    set(&mut store, tag::F_NUMBER, IfdGroup::Exif, Rational::new(189, 100).into());
    set(&mut store, tag::ISO_SPEED_RATINGS, IfdGroup::Exif, 64u16.into());
    set(
        &mut store,
        tag::EXPOSURE_BIAS_VALUE,
        IfdGroup::Exif,
        exifkit::TagValue::SRational(vec![Rational::new(-1, 3)]),
    );
    set(&mut store, tag::FLASH, IfdGroup::Exif, 16u16.into());
    set(&mut store, tag::FOCAL_LENGTH, IfdGroup::Exif, Rational::new(690, 100).into());
    set(&mut store, tag::PIXEL_X_DIMENSION, IfdGroup::Exif, 4080u32.into());
    set(&mut store, tag::PIXEL_Y_DIMENSION, IfdGroup::Exif, 3072u32.into());
    set(&mut store, tag::WHITE_BALANCE, IfdGroup::Exif, 0u16.into());
    set(
        &mut store,
        tag::EXIF_VERSION,
        IfdGroup::Exif,
        exifkit::TagValue::Undefined(b"0232".to_vec()),
    );
    set(
        &mut store,
        tag::INTEROPERABILITY_INDEX,
        IfdGroup::Interoperability,
        "R98".into(),
    );

    let fix_time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    add_location(&mut store, 37.422, -122.084, 32.5, &fix_time).unwrap();

    set(&mut store, tag::COMPRESSION, IfdGroup::Thumbnail, 6u16.into());
    store.set_thumbnail(minimal_jpeg());
    store
}

/// [`jfif_jpeg`] carrying `store` in an EXIF segment after SOI
pub fn jpeg_with_exif(store: &TagStore) -> Vec<u8> {
    JpegSegmentEditor::insert_new(&jfif_jpeg(), &exifkit::encode(store)).unwrap()
}

/// Write `bytes` to `name` inside `dir`
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
