//! EXIF value types
//!
//! This module defines the value types stored in EXIF fields.

pub mod rational;
pub mod value;

pub use rational::Rational;
pub use value::{DataType, TagValue};
