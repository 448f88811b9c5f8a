//! EXIF Date/Time utilities
//!
//! EXIF stores timestamps as 19-character ASCII strings in the form
//! `YYYY:MM:DD HH:MM:SS`, without a time zone. The local time of the
//! capturing device is assumed.

use crate::core::error::ExifResult;
use crate::core::store::TagStore;
use crate::core::tag::IfdGroup;
use chrono::{DateTime, NaiveDateTime, TimeZone};

/// chrono format string of EXIF date/time values
pub const EXIF_DATE_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Format a timestamp in its own offset.
///
/// # Example
///
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use exifkit::utils::datetime::format_exif_date_time;
///
/// let tz = FixedOffset::west_opt(5 * 3600).unwrap();
/// let time = tz.with_ymd_and_hms(2023, 12, 25, 10, 30, 0).unwrap();
/// assert_eq!(format_exif_date_time(&time), "2023:12:25 10:30:00");
/// ```
pub fn format_exif_date_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    timestamp.naive_local().format(EXIF_DATE_TIME_FORMAT).to_string()
}

/// Parse an EXIF date/time string. Trailing NULs and spaces are ignored.
pub fn parse_exif_date_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim_end_matches(['\0', ' ']);
    NaiveDateTime::parse_from_str(s, EXIF_DATE_TIME_FORMAT)
}

/// Set a date/time tag such as `DateTime` or `DateTimeOriginal`
pub fn add_date_time_stamp<Tz: TimeZone>(
    store: &mut TagStore,
    id: u16,
    group: IfdGroup,
    timestamp: &DateTime<Tz>,
) -> ExifResult<()> {
    store.set(TagStore::build(id, group, format_exif_date_time(timestamp))?);
    Ok(())
}

/// Read a date/time tag. Blank or malformed values yield `None`.
pub fn date_time(store: &TagStore, id: u16, group: IfdGroup) -> Option<NaiveDateTime> {
    let text = store.get_value(id, group)?.as_str()?;
    match parse_exif_date_time(text) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::debug!("Ignoring unparsable date/time {:?}: {}", text, e);
            None
        }
    }
}
