//! Error types for EXIF operations
//!
//! This module defines all error types used throughout the crate. Each layer
//! has its own error enum so callers can tell a malformed TIFF structure from
//! a malformed JPEG container or a rejected tag value; [`ExifError`] wraps all
//! of them for the high-level APIs.

use crate::core::tag::IfdGroup;
use thiserror::Error;

/// Errors raised while decoding a TIFF/EXIF byte region
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An offset or a component count runs past the end of the buffer
    #[error("EXIF data truncated: {len} bytes needed at offset {offset}")]
    Truncated { offset: usize, len: usize },

    /// The byte-order marker is neither `II` nor `MM`
    #[error("Bad byte order marker: {0:02X?}")]
    BadByteOrder([u8; 2]),

    /// The TIFF magic number is not 42
    #[error("Bad TIFF magic number: {0}")]
    BadMagic(u16),

    /// An IFD offset points back at a directory that was already read
    #[error("Circular IFD reference at offset {0}")]
    CircularIfd(u32),
}

/// Errors raised while scanning or splicing a JPEG marker stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// The stream does not start with the SOI marker
    #[error("Not a valid JPEG file")]
    NotAJpeg,

    /// A marker is garbled or declares a length running past the buffer
    #[error("Malformed JPEG marker at offset {offset}")]
    MalformedMarker { offset: usize },

    /// The EXIF payload does not fit into a single APP1 segment
    #[error("EXIF payload of {0} bytes does not fit into an APP1 segment")]
    SegmentTooLarge(usize),

    /// An insert was requested but the stream already carries EXIF
    #[error("JPEG already contains an EXIF segment")]
    ExifAlreadyPresent,

    /// An in-place rewrite was requested but the stream carries no EXIF
    #[error("JPEG does not contain an EXIF segment")]
    NoExifSegment,

    /// The region handed to a replace does not describe an EXIF APP1 segment
    #[error("Invalid EXIF segment region {start}..{end}")]
    InvalidRegion { start: usize, end: usize },
}

/// Errors raised when a tag value does not match the tag definition table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The tag id is not defined for the requested IFD group
    #[error("Unknown tag {id:#06x} in {group} IFD")]
    UnknownTag { id: u16, group: IfdGroup },

    /// The value has the wrong data type, component count or range
    #[error("Type mismatch for tag {id:#06x}: expected {expected}, found {found}")]
    TypeMismatch {
        id: u16,
        expected: String,
        found: String,
    },
}

/// Error type for high-level EXIF operations
#[derive(Debug, Error)]
pub enum ExifError {
    /// Malformed or truncated EXIF data
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Malformed JPEG container
    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),

    /// Tag value rejected by the definition table
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// IO error from the byte source or sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rotation is not a multiple of 90 degrees
    #[error("Unsupported rotation: {0} degrees")]
    UnsupportedRotation(i32),

    /// Latitude or longitude out of range, or not finite
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Data required for the operation is not available
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for EXIF operations
pub type ExifResult<T> = Result<T, ExifError>;
