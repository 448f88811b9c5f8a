//! Camera and image property helpers

use crate::core::definitions::tag;
use crate::core::error::ExifResult;
use crate::core::store::TagStore;
use crate::core::tag::IfdGroup;
use crate::types::rational::Rational;

/// Capture settings commonly shown in a photo details view
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraSettings {
    pub make: Option<String>,
    pub model: Option<String>,
    /// Exposure time in seconds, kept exact (e.g. 1/250)
    pub exposure_time: Option<Rational>,
    pub f_number: Option<f64>,
    /// APEX aperture value
    pub aperture: Option<f64>,
    pub iso: Option<u32>,
    /// Focal length in millimeters
    pub focal_length: Option<f64>,
    /// Raw `Flash` bit field
    pub flash: Option<u16>,
    /// 0 = auto, 1 = manual
    pub white_balance: Option<u16>,
}

impl CameraSettings {
    /// Whether the flash fired, if recorded
    pub fn flash_fired(&self) -> Option<bool> {
        self.flash.map(|flash| flash & 0x1 != 0)
    }
}

/// North reference for `GPSImgDirection`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionRef {
    TrueNorth,
    MagneticNorth,
}

impl DirectionRef {
    fn as_str(self) -> &'static str {
        match self {
            DirectionRef::TrueNorth => "T",
            DirectionRef::MagneticNorth => "M",
        }
    }
}

/// Image size in pixels.
///
/// Prefers the Exif pixel dimensions and falls back to IFD0's
/// `ImageWidth`/`ImageLength`.
pub fn image_dimensions(store: &TagStore) -> Option<(u32, u32)> {
    let pair = |width_id, height_id, group| {
        let width = store.get_int_value(width_id, group)?;
        let height = store.get_int_value(height_id, group)?;
        Some((u32::try_from(width).ok()?, u32::try_from(height).ok()?))
    };
    pair(tag::PIXEL_X_DIMENSION, tag::PIXEL_Y_DIMENSION, IfdGroup::Exif)
        .or_else(|| pair(tag::IMAGE_WIDTH, tag::IMAGE_LENGTH, IfdGroup::Primary))
}

/// Set the Exif pixel dimensions
pub fn set_image_dimensions(store: &mut TagStore, width: u32, height: u32) -> ExifResult<()> {
    store.set(TagStore::build(tag::PIXEL_X_DIMENSION, IfdGroup::Exif, width)?);
    store.set(TagStore::build(tag::PIXEL_Y_DIMENSION, IfdGroup::Exif, height)?);
    Ok(())
}

/// Collect the capture settings present in the Exif and primary IFDs
pub fn camera_settings(store: &TagStore) -> CameraSettings {
    let text = |id| {
        store
            .get_value(id, IfdGroup::Primary)
            .and_then(|value| value.as_str())
            .map(|s| s.trim_end().to_string())
    };
    let rational = |id| {
        store
            .get_value(id, IfdGroup::Exif)
            .and_then(|value| value.as_rational(0))
    };
    let short = |id| {
        store
            .get_int_value(id, IfdGroup::Exif)
            .and_then(|v| u16::try_from(v).ok())
    };

    CameraSettings {
        make: text(tag::MAKE),
        model: text(tag::MODEL),
        exposure_time: rational(tag::EXPOSURE_TIME),
        f_number: rational(tag::F_NUMBER).map(|r| r.to_f64()),
        aperture: rational(tag::APERTURE_VALUE).map(|r| r.to_f64()),
        iso: store
            .get_int_value(tag::ISO_SPEED_RATINGS, IfdGroup::Exif)
            .and_then(|v| u32::try_from(v).ok()),
        focal_length: rational(tag::FOCAL_LENGTH).map(|r| r.to_f64()),
        flash: short(tag::FLASH),
        white_balance: short(tag::WHITE_BALANCE),
    }
}

/// Set the direction the camera was pointing, in degrees clockwise from
/// `reference`. Stored with a precision of 1/100 degree.
pub fn set_image_direction(store: &mut TagStore, degrees: f64, reference: DirectionRef) -> ExifResult<()> {
    let degrees = degrees.rem_euclid(360.0);
    let direction = Rational::new((degrees * 100.0).round() as i64, 100);
    store.set(TagStore::build(tag::GPS_IMG_DIRECTION_REF, IfdGroup::Gps, reference.as_str())?);
    store.set(TagStore::build(tag::GPS_IMG_DIRECTION, IfdGroup::Gps, direction)?);
    Ok(())
}
