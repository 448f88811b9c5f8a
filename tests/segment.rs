//! Tests for JPEG segment splicing
//!
//! These tests verify that the EXIF segment can be inserted and replaced
//! without touching any other byte of the stream.

#[path = "fixtures/mod.rs"]
mod fixtures;

use exifkit::{encode, ExifSegment, JpegSegmentEditor, SegmentError, TagStore};
use fixtures::{camera_store, jfif_jpeg, jpeg_with_exif, minimal_jpeg};
use pretty_assertions::assert_eq;

fn locate(bytes: &[u8]) -> exifkit::SegmentRegion {
    JpegSegmentEditor::locate_exif_segment(bytes)
        .unwrap()
        .region()
        .expect("EXIF segment")
}

#[test]
fn insert_places_segment_after_soi() {
    let jpeg = jfif_jpeg();
    let payload = encode(&camera_store());
    let out = JpegSegmentEditor::insert_new(&jpeg, &payload).unwrap();

    assert_eq!(&out[..2], &[0xFF, 0xD8]);
    assert_eq!(&out[out.len() - 2..], &[0xFF, 0xD9]);

    let region = locate(&out);
    assert_eq!(region.start, 2);
    assert_eq!(JpegSegmentEditor::exif_payload(&out, region).unwrap(), &payload[..]);
    assert_eq!(&out[region.end..], &jpeg[2..]);
}

#[test]
fn insert_into_minimal_jpeg() {
    let out = JpegSegmentEditor::insert_new(&minimal_jpeg(), &encode(&TagStore::new())).unwrap();
    assert_eq!(&out[..4], &[0xFF, 0xD8, 0xFF, 0xE1]);
    assert_eq!(&out[out.len() - 2..], &[0xFF, 0xD9]);
}

#[test]
fn replace_with_smaller_larger_and_equal_payloads() {
    let original = jpeg_with_exif(&camera_store());
    let region = locate(&original);
    let old_len = JpegSegmentEditor::exif_payload(&original, region).unwrap().len();

    for new_len in [old_len / 2, old_len, old_len * 2] {
        let payload: Vec<u8> = (0..new_len).map(|i| i as u8).collect();
        let out = JpegSegmentEditor::replace_existing(&original, region, &payload).unwrap();

        let new_region = locate(&out);
        assert_eq!(new_region.start, region.start);
        assert_eq!(&out[..region.start], &original[..region.start]);
        assert_eq!(&out[new_region.end..], &original[region.end..]);
        assert_eq!(JpegSegmentEditor::exif_payload(&out, new_region).unwrap(), &payload[..]);
        assert_eq!(out.len(), original.len() - old_len + new_len);
    }
}

#[test]
fn scan_data_is_never_inspected() {
    let jpeg = jfif_jpeg();
    assert_eq!(
        JpegSegmentEditor::locate_exif_segment(&jpeg).unwrap(),
        ExifSegment::NotFound
    );
}

#[test]
fn non_jpeg_input_is_rejected() {
    let png = b"\x89PNG\r\n\x1a\n".to_vec();
    assert_eq!(
        JpegSegmentEditor::locate_exif_segment(&png).unwrap_err(),
        SegmentError::NotAJpeg
    );
    assert_eq!(
        JpegSegmentEditor::insert_new(&png, b"MM\0*").unwrap_err(),
        SegmentError::NotAJpeg
    );
    assert_eq!(
        JpegSegmentEditor::locate_exif_segment(&[]).unwrap_err(),
        SegmentError::NotAJpeg
    );
}

#[test]
fn second_insert_is_refused() {
    let jpeg = jpeg_with_exif(&TagStore::new());
    assert_eq!(
        JpegSegmentEditor::insert_new(&jpeg, b"MM\0*").unwrap_err(),
        SegmentError::ExifAlreadyPresent
    );
}

#[test]
fn streaming_locate_matches_in_memory() {
    let jpeg = jpeg_with_exif(&camera_store());
    let region = locate(&jpeg);
    let streamed = JpegSegmentEditor::read_exif_payload(std::io::Cursor::new(&jpeg))
        .unwrap()
        .unwrap();
    assert_eq!(&streamed[..], &jpeg[region.payload_range()]);
}
