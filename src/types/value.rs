//! EXIF value types
//!
//! This module defines the TIFF data types an EXIF field can carry and the
//! typed component vectors stored for each of them.

use crate::types::rational::Rational;
use std::fmt;

/// TIFF field data types understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// 8-bit unsigned integer
    Byte,
    /// NUL-terminated 7-bit ASCII
    Ascii,
    /// 16-bit unsigned integer
    Short,
    /// 32-bit unsigned integer
    Long,
    /// Two 32-bit unsigned integers
    Rational,
    /// Opaque bytes
    Undefined,
    /// 32-bit signed integer
    SLong,
    /// Two 32-bit signed integers
    SRational,
}

impl DataType {
    /// Map a TIFF type code to a data type, `None` for codes the codec skips
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(DataType::Byte),
            2 => Some(DataType::Ascii),
            3 => Some(DataType::Short),
            4 => Some(DataType::Long),
            5 => Some(DataType::Rational),
            7 => Some(DataType::Undefined),
            9 => Some(DataType::SLong),
            10 => Some(DataType::SRational),
            _ => None,
        }
    }

    /// TIFF type code written into directory entries
    pub fn code(self) -> u16 {
        match self {
            DataType::Byte => 1,
            DataType::Ascii => 2,
            DataType::Short => 3,
            DataType::Long => 4,
            DataType::Rational => 5,
            DataType::Undefined => 7,
            DataType::SLong => 9,
            DataType::SRational => 10,
        }
    }

    /// Width of one component in bytes
    pub fn component_size(self) -> usize {
        match self {
            DataType::Byte | DataType::Ascii | DataType::Undefined => 1,
            DataType::Short => 2,
            DataType::Long | DataType::SLong => 4,
            DataType::Rational | DataType::SRational => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "BYTE",
            DataType::Ascii => "ASCII",
            DataType::Short => "SHORT",
            DataType::Long => "LONG",
            DataType::Rational => "RATIONAL",
            DataType::Undefined => "UNDEFINED",
            DataType::SLong => "SLONG",
            DataType::SRational => "SRATIONAL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Components of an EXIF field, one variant per [`DataType`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagValue {
    Byte(Vec<u8>),
    /// ASCII text without its NUL terminator
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    Undefined(Vec<u8>),
    SLong(Vec<i32>),
    SRational(Vec<Rational>),
}

impl TagValue {
    pub fn data_type(&self) -> DataType {
        match self {
            TagValue::Byte(_) => DataType::Byte,
            TagValue::Ascii(_) => DataType::Ascii,
            TagValue::Short(_) => DataType::Short,
            TagValue::Long(_) => DataType::Long,
            TagValue::Rational(_) => DataType::Rational,
            TagValue::Undefined(_) => DataType::Undefined,
            TagValue::SLong(_) => DataType::SLong,
            TagValue::SRational(_) => DataType::SRational,
        }
    }

    /// Number of components as written to the directory entry.
    ///
    /// ASCII values count their terminating NUL.
    pub fn component_count(&self) -> usize {
        match self {
            TagValue::Byte(v) | TagValue::Undefined(v) => v.len(),
            TagValue::Ascii(s) => s.len() + 1,
            TagValue::Short(v) => v.len(),
            TagValue::Long(v) => v.len(),
            TagValue::SLong(v) => v.len(),
            TagValue::Rational(v) | TagValue::SRational(v) => v.len(),
        }
    }

    /// Encoded size of the value in bytes
    pub fn byte_len(&self) -> usize {
        self.component_count() * self.data_type().component_size()
    }

    /// Get the value as text, if it is an ASCII value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) => Some(s),
            _ => None,
        }
    }

    /// Get the raw bytes of a BYTE or UNDEFINED value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TagValue::Byte(v) | TagValue::Undefined(v) => Some(v),
            _ => None,
        }
    }

    /// Get an integral component, `None` for non-integral types
    pub fn as_i64(&self, index: usize) -> Option<i64> {
        match self {
            TagValue::Byte(v) => v.get(index).map(|&b| b as i64),
            TagValue::Short(v) => v.get(index).map(|&s| s as i64),
            TagValue::Long(v) => v.get(index).map(|&l| l as i64),
            TagValue::SLong(v) => v.get(index).map(|&l| l as i64),
            _ => None,
        }
    }

    /// Get the rational components of a RATIONAL or SRATIONAL value
    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            TagValue::Rational(v) | TagValue::SRational(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_rational(&self, index: usize) -> Option<Rational> {
        self.as_rationals().and_then(|v| v.get(index).copied())
    }

    /// First component forced into an integer, whatever the type.
    ///
    /// UNDEFINED bytes count as integers, rationals are truncated and ASCII
    /// yields `None`.
    pub fn force_i64(&self, index: usize) -> Option<i64> {
        match self {
            TagValue::Undefined(v) => v.get(index).map(|&b| b as i64),
            TagValue::Rational(v) | TagValue::SRational(v) => {
                v.get(index).map(|r| r.to_f64() as i64)
            }
            TagValue::Ascii(_) => None,
            _ => self.as_i64(index),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            TagValue::Ascii(s) => f.write_str(s),
            TagValue::Byte(v) | TagValue::Undefined(v) => join(f, v),
            TagValue::Short(v) => join(f, v),
            TagValue::Long(v) => join(f, v),
            TagValue::SLong(v) => join(f, v),
            TagValue::Rational(v) | TagValue::SRational(v) => join(f, v),
        }
    }
}

impl From<u8> for TagValue {
    fn from(b: u8) -> Self {
        TagValue::Byte(vec![b])
    }
}

impl From<u16> for TagValue {
    fn from(s: u16) -> Self {
        TagValue::Short(vec![s])
    }
}

impl From<u32> for TagValue {
    fn from(l: u32) -> Self {
        TagValue::Long(vec![l])
    }
}

impl From<i32> for TagValue {
    fn from(l: i32) -> Self {
        TagValue::SLong(vec![l])
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Ascii(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Ascii(s)
    }
}

impl From<Rational> for TagValue {
    fn from(r: Rational) -> Self {
        TagValue::Rational(vec![r])
    }
}

impl From<Vec<Rational>> for TagValue {
    fn from(v: Vec<Rational>) -> Self {
        TagValue::Rational(v)
    }
}

impl From<Vec<u16>> for TagValue {
    fn from(v: Vec<u16>) -> Self {
        TagValue::Short(v)
    }
}

impl From<Vec<u32>> for TagValue {
    fn from(v: Vec<u32>) -> Self {
        TagValue::Long(v)
    }
}
