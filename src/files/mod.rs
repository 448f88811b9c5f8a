//! JPEG file support for EXIF
//!
//! This module provides functionality for reading and writing EXIF metadata
//! in JPEG files, from raw bytes, readers or file paths. All implementations
//! are pure Rust.

pub mod file;
pub mod jpeg;
pub mod ops;
pub mod options;

pub use file::ExifFile;
pub use jpeg::{ExifSegment, JpegSegmentEditor, SegmentRegion, EXIF_SIGNATURE, MAX_EXIF_PAYLOAD};
pub use ops::{
    add_exif, add_exif_now, add_location_to_store, orientation_from_jpeg, read_exif,
    rotate_in_jpeg_exif, rotation_from_path, rotation_from_reader, try_read_exif, write_file,
    write_jpeg_with_exif, Location,
};
pub use options::ExifOptions;
