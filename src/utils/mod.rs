//! Semantic accessors over a [`TagStore`](crate::core::store::TagStore)
//!
//! Typed helpers for the tags applications care about: orientation, GPS
//! position, timestamps, camera settings and display strings.

pub mod camera;
pub mod datetime;
pub mod display;
pub mod location;
pub mod orientation;

pub use camera::{
    camera_settings, image_dimensions, set_image_dimensions, set_image_direction, CameraSettings,
    DirectionRef,
};
pub use datetime::{
    add_date_time_stamp, date_time, format_exif_date_time, parse_exif_date_time,
    EXIF_DATE_TIME_FORMAT,
};
pub use display::coerce_to_display_string;
pub use location::{add_gps_date_time_stamp, add_location, gps_location, GpsLocation};
pub use orientation::{
    orientation_degrees, orientation_value_for_rotation, rotation_for_orientation_value,
    set_orientation,
};
