//! Orientation tag helpers
//!
//! EXIF orientation codes 1-8 map onto clockwise rotations; the mirrored
//! variants (2, 4, 5, 7) share the rotation of their unmirrored partner.

use crate::core::definitions::tag;
use crate::core::error::{ExifError, ExifResult};
use crate::core::store::TagStore;
use crate::core::tag::IfdGroup;

/// Clockwise rotation in degrees (0, 90, 180 or 270) for an orientation code.
///
/// Unknown codes map to 0.
pub fn rotation_for_orientation_value(value: i64) -> i32 {
    match value {
        1 | 2 => 0,
        3 | 4 => 180,
        6 | 7 => 90,
        5 | 8 => 270,
        _ => 0,
    }
}

/// Clockwise rotation of the primary image, 0 when the tag is absent
///
/// # Example
///
/// ```rust
/// use exifkit::{orientation_degrees, IfdGroup, TagStore, tag};
///
/// let mut store = TagStore::new();
/// assert_eq!(orientation_degrees(&store), 0);
///
/// store.set(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 6u16).unwrap());
/// assert_eq!(orientation_degrees(&store), 90);
/// ```
pub fn orientation_degrees(store: &TagStore) -> i32 {
    store
        .get_int_value(tag::ORIENTATION, IfdGroup::Primary)
        .map_or(0, rotation_for_orientation_value)
}

/// Orientation code for a clockwise rotation.
///
/// The rotation is normalized into `[0, 360)` first, so -90 and 270 agree.
pub fn orientation_value_for_rotation(degrees: i32) -> ExifResult<u16> {
    match degrees.rem_euclid(360) {
        0 => Ok(1),
        90 => Ok(6),
        180 => Ok(3),
        270 => Ok(8),
        _ => Err(ExifError::UnsupportedRotation(degrees)),
    }
}

/// Set the primary image orientation from a clockwise rotation
pub fn set_orientation(store: &mut TagStore, degrees: i32) -> ExifResult<()> {
    let value = orientation_value_for_rotation(degrees)?;
    store.set(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_for_every_code() {
        let expected = [(1, 0), (2, 0), (3, 180), (4, 180), (5, 270), (6, 90), (7, 90), (8, 270)];
        for (code, degrees) in expected {
            assert_eq!(rotation_for_orientation_value(code), degrees, "code {}", code);
        }
        assert_eq!(rotation_for_orientation_value(0), 0);
        assert_eq!(rotation_for_orientation_value(9), 0);
        assert_eq!(rotation_for_orientation_value(-1), 0);
    }

    #[test]
    fn test_value_for_rotation() {
        assert_eq!(orientation_value_for_rotation(0).unwrap(), 1);
        assert_eq!(orientation_value_for_rotation(90).unwrap(), 6);
        assert_eq!(orientation_value_for_rotation(180).unwrap(), 3);
        assert_eq!(orientation_value_for_rotation(270).unwrap(), 8);
        assert_eq!(orientation_value_for_rotation(-90).unwrap(), 8);
        assert_eq!(orientation_value_for_rotation(450).unwrap(), 6);
        assert!(matches!(
            orientation_value_for_rotation(45),
            Err(ExifError::UnsupportedRotation(45))
        ));
    }

    #[test]
    fn test_set_orientation_round_trip() {
        let mut store = TagStore::new();
        for degrees in [0, 90, 180, 270] {
            set_orientation(&mut store, degrees).unwrap();
            assert_eq!(orientation_degrees(&store), degrees);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_non_integral_orientation_is_ignored() {
        let mut store = TagStore::new();
        store.set(crate::core::tag::Tag::new(
            tag::ORIENTATION,
            IfdGroup::Primary,
            crate::types::value::TagValue::Ascii("6".into()),
        ));
        assert_eq!(orientation_degrees(&store), 0);
    }
}
