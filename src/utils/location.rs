//! GPS location helpers
//!
//! Coordinates are written as three unsigned rationals (degrees, minutes,
//! seconds) with a separate hemisphere reference, the way cameras store them.

use crate::core::definitions::tag;
use crate::core::error::{ExifError, ExifResult};
use crate::core::store::TagStore;
use crate::core::tag::{IfdGroup, Tag};
use crate::types::rational::Rational;
use crate::types::value::TagValue;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// Precision of the seconds component
const SECONDS_DENOMINATOR: i64 = 10_000;

/// Precision of the altitude
const ALTITUDE_DENOMINATOR: i64 = 1_000;

/// A position decoded from the GPS IFD
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsLocation {
    /// Decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Meters relative to sea level, if recorded
    pub altitude: Option<f64>,
    /// UTC fix time, if both date and time stamps are recorded
    pub timestamp: Option<DateTime<Utc>>,
}

/// Write latitude, longitude, the UTC date/time stamps and, when non-zero,
/// the altitude into the GPS IFD.
///
/// A zero altitude is indistinguishable from "unknown" and is not written.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use exifkit::{add_location, gps_location, TagStore};
///
/// let mut store = TagStore::new();
/// let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
/// add_location(&mut store, 37.5, -122.25, 0.0, &time).unwrap();
///
/// let location = gps_location(&store).unwrap();
/// assert_eq!(location.latitude, 37.5);
/// assert_eq!(location.longitude, -122.25);
/// assert_eq!(location.altitude, None);
/// ```
pub fn add_location<Tz: TimeZone>(
    store: &mut TagStore,
    latitude: f64,
    longitude: f64,
    altitude_meters: f64,
    timestamp: &DateTime<Tz>,
) -> ExifResult<()> {
    if !latitude.is_finite()
        || !longitude.is_finite()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        return Err(ExifError::InvalidCoordinate { latitude, longitude });
    }

    let latitude_ref = if latitude < 0.0 { "S" } else { "N" };
    let longitude_ref = if longitude < 0.0 { "W" } else { "E" };
    let mut tags = vec![
        TagStore::build(tag::GPS_LATITUDE, IfdGroup::Gps, to_dms(latitude))?,
        TagStore::build(tag::GPS_LATITUDE_REF, IfdGroup::Gps, latitude_ref)?,
        TagStore::build(tag::GPS_LONGITUDE, IfdGroup::Gps, to_dms(longitude))?,
        TagStore::build(tag::GPS_LONGITUDE_REF, IfdGroup::Gps, longitude_ref)?,
    ];
    tags.extend(gps_date_time_tags(timestamp)?);

    if altitude_meters.is_finite() && altitude_meters != 0.0 {
        let altitude_ref: u8 = if altitude_meters < 0.0 { 1 } else { 0 };
        tags.push(TagStore::build(tag::GPS_ALTITUDE, IfdGroup::Gps, altitude_rational(altitude_meters))?);
        tags.push(TagStore::build(
            tag::GPS_ALTITUDE_REF,
            IfdGroup::Gps,
            TagValue::Byte(vec![altitude_ref]),
        )?);
    } else if !altitude_meters.is_finite() {
        log::warn!("Skipping non-finite GPS altitude {}", altitude_meters);
    }

    for gps_tag in tags {
        store.set(gps_tag);
    }
    Ok(())
}

/// Write `GPSDateStamp` and `GPSTimeStamp` for `timestamp`, converted to UTC
pub fn add_gps_date_time_stamp<Tz: TimeZone>(store: &mut TagStore, timestamp: &DateTime<Tz>) -> ExifResult<()> {
    for gps_tag in gps_date_time_tags(timestamp)? {
        store.set(gps_tag);
    }
    Ok(())
}

fn gps_date_time_tags<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> ExifResult<[Tag; 2]> {
    let utc = timestamp.with_timezone(&Utc);
    let date = utc.format("%Y:%m:%d").to_string();
    let time = vec![
        Rational::new(utc.hour() as i64, 1),
        Rational::new(utc.minute() as i64, 1),
        Rational::new(utc.second() as i64, 1),
    ];
    Ok([
        TagStore::build(tag::GPS_DATE_STAMP, IfdGroup::Gps, date)?,
        TagStore::build(tag::GPS_TIME_STAMP, IfdGroup::Gps, time)?,
    ])
}

/// |meters| in millimeter precision, falling back to whole meters and then
/// to the largest representable value when the numerator overflows 32 bits
fn altitude_rational(meters: f64) -> Rational {
    let meters = meters.abs();
    let millimeters = (meters * ALTITUDE_DENOMINATOR as f64).round();
    if millimeters <= u32::MAX as f64 {
        return Rational::new(millimeters as i64, ALTITUDE_DENOMINATOR);
    }
    log::warn!("GPS altitude {} m stored in whole meters", meters);
    Rational::new(meters.round().min(u32::MAX as f64) as i64, 1)
}

/// Read the position back from the GPS IFD.
///
/// Returns `None` unless latitude, longitude and both references are present
/// and well-formed.
pub fn gps_location(store: &TagStore) -> Option<GpsLocation> {
    let latitude = signed_coordinate(store, tag::GPS_LATITUDE, tag::GPS_LATITUDE_REF, "S")?;
    let longitude = signed_coordinate(store, tag::GPS_LONGITUDE, tag::GPS_LONGITUDE_REF, "W")?;

    let altitude = store
        .get_value(tag::GPS_ALTITUDE, IfdGroup::Gps)
        .and_then(|value| value.as_rational(0))
        .map(|altitude| {
            let below_sea_level = store.get_int_value(tag::GPS_ALTITUDE_REF, IfdGroup::Gps) == Some(1);
            if below_sea_level {
                -altitude.to_f64()
            } else {
                altitude.to_f64()
            }
        });

    Some(GpsLocation {
        latitude,
        longitude,
        altitude,
        timestamp: gps_timestamp(store),
    })
}

fn signed_coordinate(store: &TagStore, id: u16, ref_id: u16, negative_ref: &str) -> Option<f64> {
    let dms = store.get_value(id, IfdGroup::Gps)?.as_rationals()?;
    let reference = store.get_value(ref_id, IfdGroup::Gps)?.as_str()?;
    let [degrees, minutes, seconds] = dms else {
        return None;
    };
    let value = degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0;
    if !value.is_finite() {
        return None;
    }
    Some(if reference == negative_ref { -value } else { value })
}

fn gps_timestamp(store: &TagStore) -> Option<DateTime<Utc>> {
    let date = store.get_value(tag::GPS_DATE_STAMP, IfdGroup::Gps)?.as_str()?;
    let date = NaiveDate::parse_from_str(date, "%Y:%m:%d").ok()?;

    let time = store.get_value(tag::GPS_TIME_STAMP, IfdGroup::Gps)?.as_rationals()?;
    let [hour, minute, second] = time else {
        return None;
    };
    let time = NaiveTime::from_hms_opt(
        hour.to_f64() as u32,
        minute.to_f64() as u32,
        second.to_f64() as u32,
    )?;
    Some(date.and_time(time).and_utc())
}

/// Degrees, minutes and seconds of the absolute value
fn to_dms(value: f64) -> Vec<Rational> {
    let value = value.abs();
    let degrees = value.trunc();
    let minutes_total = (value - degrees) * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = (minutes_total - minutes) * 60.0;
    vec![
        Rational::new(degrees as i64, 1),
        Rational::new(minutes as i64, 1),
        Rational::new((seconds * SECONDS_DENOMINATOR as f64).round() as i64, SECONDS_DENOMINATOR),
    ]
}
