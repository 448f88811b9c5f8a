//! Single-line rendering of tag values for UI labels

use crate::core::tag::Tag;
use crate::types::value::TagValue;

/// Render a tag's value as one short string.
///
/// Rationals show the decimal quotient of their first component, ASCII is
/// returned verbatim and every other type shows its first component as an
/// integer (0 when the value is empty).
///
/// # Example
///
/// ```rust
/// use exifkit::{coerce_to_display_string, IfdGroup, Rational, TagStore, tag};
///
/// let exposure = TagStore::build(tag::EXPOSURE_TIME, IfdGroup::Exif, Rational::new(1, 4)).unwrap();
/// assert_eq!(coerce_to_display_string(&exposure), "0.25");
/// ```
pub fn coerce_to_display_string(tag: &Tag) -> String {
    match tag.value() {
        TagValue::Ascii(text) => text.clone(),
        value @ (TagValue::Rational(_) | TagValue::SRational(_)) => value
            .as_rational(0)
            .map_or_else(|| "0".to_string(), |r| r.to_f64().to_string()),
        value => value.force_i64(0).unwrap_or(0).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tag::IfdGroup;
    use crate::types::rational::Rational;

    fn tag(value: TagValue) -> Tag {
        Tag::new(0x9999, IfdGroup::Exif, value)
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(coerce_to_display_string(&tag(TagValue::Ascii("Pixel 8".into()))), "Pixel 8");
        assert_eq!(
            coerce_to_display_string(&tag(TagValue::Rational(vec![Rational::new(18, 10)]))),
            "1.8"
        );
        assert_eq!(
            coerce_to_display_string(&tag(TagValue::SRational(vec![Rational::new(-1, 3), Rational::new(1, 1)]))),
            (-1.0f64 / 3.0).to_string()
        );
        assert_eq!(coerce_to_display_string(&tag(TagValue::Short(vec![16, 1]))), "16");
        assert_eq!(coerce_to_display_string(&tag(TagValue::SLong(vec![-7]))), "-7");
        assert_eq!(coerce_to_display_string(&tag(TagValue::Undefined(vec![0x30, 0x32]))), "48");
        assert_eq!(coerce_to_display_string(&tag(TagValue::Long(vec![]))), "0");
        assert_eq!(coerce_to_display_string(&tag(TagValue::Rational(vec![]))), "0");
    }

    #[test]
    fn test_whole_rational() {
        assert_eq!(
            coerce_to_display_string(&tag(TagValue::Rational(vec![Rational::new(4, 1)]))),
            "4"
        );
    }
}
