//! EXIF rational numbers

use std::fmt;

/// A numerator/denominator pair as stored in RATIONAL and SRATIONAL fields.
///
/// Components are kept as `i64` so a single type covers both the unsigned
/// (`u32`/`u32`) and the signed (`i32`/`i32`) wire representation. The value
/// is stored exactly; [`Rational::to_f64`] is the lossy view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// Create a rational from its two components
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Quotient as a float. A zero denominator yields an infinite or NaN value.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whether both components fit the unsigned 32-bit wire format
    pub fn fits_unsigned(&self) -> bool {
        u32::try_from(self.numerator).is_ok() && u32::try_from(self.denominator).is_ok()
    }

    /// Whether both components fit the signed 32-bit wire format
    pub fn fits_signed(&self) -> bool {
        i32::try_from(self.numerator).is_ok() && i32::try_from(self.denominator).is_ok()
    }
}

impl From<(u32, u32)> for Rational {
    fn from((numerator, denominator): (u32, u32)) -> Self {
        Self::new(numerator as i64, denominator as i64)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((numerator, denominator): (i32, i32)) -> Self {
        Self::new(numerator as i64, denominator as i64)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
