//! # exifkit
//!
//! Pure Rust reading, editing and rewriting of EXIF metadata in JPEG files.
//!
//! The crate is layered:
//!
//! - [`core`]: the tag model ([`TagStore`], [`Tag`], [`TagValue`]) and the
//!   TIFF codec ([`decode`], [`encode`])
//! - [`files`]: the JPEG APP1 segment editor ([`JpegSegmentEditor`]), the
//!   high-level [`ExifFile`] API and one-shot helpers
//! - [`utils`]: typed accessors for orientation, GPS, timestamps and
//!   camera settings
//!
//! ## Example
//!
//! ```rust
//! use exifkit::{
//!     orientation_degrees, read_exif, set_orientation, write_jpeg_with_exif, IfdGroup,
//!     TagStore, tag,
//! };
//!
//! # fn main() -> Result<(), exifkit::ExifError> {
//! // Minimal JPEG: SOI + EOI
//! let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
//!
//! let mut store = read_exif(&jpeg);
//! store.set(TagStore::build(tag::MAKE, IfdGroup::Primary, "Example")?);
//! set_orientation(&mut store, 90)?;
//!
//! let tagged = write_jpeg_with_exif(&jpeg, &store)?;
//! assert_eq!(orientation_degrees(&read_exif(&tagged)), 90);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod files;
pub mod types;
pub mod utils;

pub use crate::core::definitions::tag;
pub use crate::core::{
    decode, encode, BuildError, ByteOrder, DecodeError, ExifError, ExifResult, IfdGroup,
    SegmentError, Tag, TagStore,
};
pub use crate::files::{
    add_exif, add_exif_now, add_location_to_store, orientation_from_jpeg, read_exif,
    rotate_in_jpeg_exif, rotation_from_path, rotation_from_reader, try_read_exif, write_file,
    write_jpeg_with_exif, ExifFile, ExifOptions, ExifSegment, JpegSegmentEditor, Location,
    SegmentRegion,
};
pub use crate::types::{DataType, Rational, TagValue};
pub use crate::utils::{
    add_date_time_stamp, add_location, camera_settings, coerce_to_display_string, date_time,
    gps_location, image_dimensions, orientation_degrees, orientation_value_for_rotation,
    set_image_dimensions, set_image_direction, set_orientation, CameraSettings, DirectionRef,
    GpsLocation,
};
