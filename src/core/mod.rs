//! EXIF Core module
//!
//! This module contains the in-memory tag model and the TIFF codec:
//! decoding an EXIF payload into a [`TagStore`], editing it, and encoding it
//! back.

pub mod byte_order;
pub mod definitions;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod store;
pub mod tag;

pub use byte_order::ByteOrder;
pub use definitions::{is_structural, lookup, ComponentCount, TagDefinition, DEFINITIONS};
pub use error::{BuildError, DecodeError, ExifError, ExifResult, SegmentError};
pub use parser::decode;
pub use serializer::encode;
pub use store::TagStore;
pub use tag::{IfdGroup, Tag};
