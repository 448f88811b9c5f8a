//! Tests for the TIFF codec
//!
//! These tests verify that stores survive an encode/decode cycle and that
//! malformed payloads are rejected.

#[path = "fixtures/mod.rs"]
mod fixtures;

use exifkit::{
    decode, encode, tag, ByteOrder, DecodeError, IfdGroup, Tag, TagStore, TagValue,
};
use fixtures::camera_store;
use pretty_assertions::assert_eq;

#[test]
fn round_trip_camera_store() {
    let store = camera_store();
    let decoded = decode(&encode(&store), 0).unwrap();
    assert_eq!(decoded, store);
    assert_eq!(decoded.thumbnail(), store.thumbnail());
}

#[test]
fn round_trip_little_endian() {
    let mut store = camera_store();
    store.set_byte_order(ByteOrder::LittleEndian);

    let bytes = encode(&store);
    assert_eq!(&bytes[..4], b"II*\0");

    let decoded = decode(&bytes, 0).unwrap();
    assert_eq!(decoded.byte_order(), ByteOrder::LittleEndian);
    assert_eq!(decoded, store);
}

#[test]
fn encode_is_deterministic() {
    let store = camera_store();
    assert_eq!(encode(&store), encode(&store));

    // Insertion order does not affect the layout
    let mut reversed = TagStore::new();
    for tag in store.all_tags().into_iter().rev() {
        reversed.set(tag.clone());
    }
    reversed.set_thumbnail(store.thumbnail().unwrap().to_vec());
    assert_eq!(encode(&reversed), encode(&store));
}

#[test]
fn round_trip_vendor_tags() {
    let mut store = TagStore::new();
    store.set(Tag::new(0xC4A5, IfdGroup::Primary, TagValue::Undefined(vec![1, 2, 3, 4, 5])));
    store.set(Tag::new(0x9999, IfdGroup::Exif, TagValue::SLong(vec![-1, 0, 1])));
    store.set(Tag::new(0x0042, IfdGroup::Gps, TagValue::Byte(vec![])));

    assert_eq!(decode(&encode(&store), 0).unwrap(), store);
}

#[test]
fn decoded_stores_hold_no_structural_tags() {
    let decoded = decode(&encode(&camera_store()), 0).unwrap();
    for tag in decoded.iter() {
        assert!(
            !exifkit::core::is_structural(tag.id(), tag.group()),
            "unexpected structural tag {}",
            tag
        );
    }
    assert!(decoded.get(tag::EXIF_IFD_POINTER, IfdGroup::Primary).is_none());
}

#[test]
fn big_endian_tiff_with_exif_ifd() {
    // MM, IFD0 with one pointer entry to an Exif IFD holding ISO 400
    let tiff: Vec<u8> = vec![
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // header
        0x00, 0x01, // IFD0: 1 entry
        0x87, 0x69, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1A, // Exif pointer
        0x00, 0x00, 0x00, 0x00, // no IFD1
        0x00, 0x01, // Exif IFD: 1 entry
        0x88, 0x27, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x01, 0x90, 0x00, 0x00, // ISO
        0x00, 0x00, 0x00, 0x00,
    ];

    let store = decode(&tiff, 0).unwrap();
    assert_eq!(store.byte_order(), ByteOrder::BigEndian);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get_int_value(tag::ISO_SPEED_RATINGS, IfdGroup::Exif), Some(400));
}

#[test]
fn every_truncation_is_rejected() {
    let bytes = encode(&camera_store());
    for len in 0..bytes.len() {
        let result = decode(&bytes[..len], 0);
        assert!(
            matches!(result, Err(DecodeError::Truncated { .. })),
            "prefix of {} bytes decoded as {:?}",
            len,
            result
        );
    }
}
