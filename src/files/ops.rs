//! One-shot EXIF operations on JPEG data and files
//!
//! Convenience functions combining the segment editor, the codec and the
//! semantic accessors. The `read_*`, `orientation_*` and `rotation_*`
//! helpers are lenient: failures are logged and yield an empty store or a
//! rotation of 0.

use crate::core::definitions::tag;
use crate::core::error::{ExifResult, SegmentError};
use crate::core::parser::decode;
use crate::core::serializer::encode;
use crate::core::store::TagStore;
use crate::core::tag::IfdGroup;
use crate::files::jpeg::{ExifSegment, JpegSegmentEditor};
use crate::utils::datetime::add_date_time_stamp;
use crate::utils::location::add_location;
use crate::utils::orientation::{orientation_degrees, set_orientation};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A position fix as reported by a location provider
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level, 0 when unknown
    pub altitude: f64,
    pub time: DateTime<Utc>,
}

/// Write a location fix into the GPS IFD
pub fn add_location_to_store(store: &mut TagStore, location: &Location) -> ExifResult<()> {
    add_location(
        store,
        location.latitude,
        location.longitude,
        location.altitude,
        &location.time,
    )
}

/// Decode the EXIF segment of a JPEG. Data without EXIF gives an empty store.
pub fn try_read_exif(jpeg: &[u8]) -> ExifResult<TagStore> {
    match JpegSegmentEditor::locate_exif_segment(jpeg)? {
        ExifSegment::Found(region) => {
            let payload = JpegSegmentEditor::exif_payload(jpeg, region)?;
            Ok(decode(payload, 0)?)
        }
        ExifSegment::NotFound => Ok(TagStore::new()),
    }
}

/// Lenient [`try_read_exif`]: any failure is logged and yields an empty store
pub fn read_exif(jpeg: &[u8]) -> TagStore {
    try_read_exif(jpeg).unwrap_or_else(|e| {
        log::warn!("Failed to read EXIF data: {}", e);
        TagStore::new()
    })
}

/// Clockwise rotation recorded in a JPEG's EXIF, 0 if unavailable
pub fn orientation_from_jpeg(jpeg: &[u8]) -> i32 {
    orientation_degrees(&read_exif(jpeg))
}

/// Clockwise rotation recorded in a JPEG stream, 0 if unavailable.
///
/// Only the header segments are read.
pub fn rotation_from_reader<R: Read>(reader: R) -> i32 {
    let store = JpegSegmentEditor::read_exif_payload(reader).and_then(|payload| match payload {
        Some(payload) => Ok(decode(&payload, 0)?),
        None => Ok(TagStore::new()),
    });
    match store {
        Ok(store) => orientation_degrees(&store),
        Err(e) => {
            log::warn!("Getting exif data failed: {}", e);
            0
        }
    }
}

/// Clockwise rotation recorded in a JPEG file, 0 if unavailable
pub fn rotation_from_path<P: AsRef<Path>>(path: P) -> i32 {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => rotation_from_reader(BufReader::new(file)),
        Err(e) => {
            log::warn!("Cannot open {}: {}", path.display(), e);
            0
        }
    }
}

/// Encode `store` into `jpeg`, replacing any existing EXIF segment
pub fn write_jpeg_with_exif(jpeg: &[u8], store: &TagStore) -> ExifResult<Vec<u8>> {
    let payload = encode(store);
    Ok(JpegSegmentEditor::write_exif(jpeg, &payload)?)
}

/// Write JPEG data to `path`, with `exif` spliced in when given.
///
/// Returns the size of the written file.
pub fn write_file<P: AsRef<Path>>(path: P, jpeg: &[u8], exif: Option<&TagStore>) -> ExifResult<u64> {
    let path = path.as_ref();
    let result = match exif {
        Some(store) => write_jpeg_with_exif(jpeg, store).and_then(|data| write_bytes(path, &data)),
        None => write_bytes(path, jpeg),
    };
    if let Err(e) = &result {
        log::error!("Failed to write data to {}: {}", path.display(), e);
    }
    result
}

/// Rewrite the orientation of a JPEG file in place.
///
/// Only works if the file already has an EXIF segment; otherwise
/// [`SegmentError::NoExifSegment`] is returned and the file is untouched.
/// All other tags of the file are kept.
pub fn rotate_in_jpeg_exif<P: AsRef<Path>>(path: P, degrees: i32) -> ExifResult<()> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let ExifSegment::Found(region) = JpegSegmentEditor::locate_exif_segment(&data)? else {
        log::warn!("Cannot set exif data: {} has no EXIF segment", path.display());
        return Err(SegmentError::NoExifSegment.into());
    };

    let mut store = decode(JpegSegmentEditor::exif_payload(&data, region)?, 0)?;
    set_orientation(&mut store, degrees)?;

    let rewritten = JpegSegmentEditor::replace_existing(&data, region, &encode(&store))?;
    write_bytes(path, &rewritten)?;
    Ok(())
}

/// Give JPEG data a minimal EXIF segment holding only a `DateTime` tag, so
/// it can be rewritten later. An existing segment is replaced.
pub fn add_exif<Tz: TimeZone>(jpeg: &[u8], timestamp: &DateTime<Tz>) -> ExifResult<Vec<u8>> {
    let mut store = TagStore::new();
    add_date_time_stamp(&mut store, tag::DATE_TIME, IfdGroup::Primary, timestamp)?;
    write_jpeg_with_exif(jpeg, &store)
}

/// [`add_exif`] stamped with the current local time
pub fn add_exif_now(jpeg: &[u8]) -> ExifResult<Vec<u8>> {
    add_exif(jpeg, &Local::now())
}

fn write_bytes(path: &Path, data: &[u8]) -> ExifResult<u64> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(data)?;
    writer.flush()?;
    Ok(data.len() as u64)
}
