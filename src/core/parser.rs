//! EXIF decoder
//!
//! Decodes a TIFF structure (as embedded in a JPEG APP1 segment) into a
//! [`TagStore`]. The walk starts at IFD0, follows the Exif and GPS pointers
//! found there, the Interoperability pointer found in the Exif IFD, and the
//! next-IFD link of IFD0 to the thumbnail IFD.
//!
//! TIFF layout reminder:
//! - 8-byte header: byte order (`II`/`MM`), magic 42, offset of IFD0
//! - IFD: entry count (u16), 12-byte entries, next IFD offset (u32)
//! - Entry: tag (u16), type (u16), count (u32), value or offset (u32)
//! - Values of up to 4 bytes are stored inline in the entry

use crate::core::byte_order::ByteOrder;
use crate::core::definitions::{is_structural, tag};
use crate::core::error::DecodeError;
use crate::core::store::TagStore;
use crate::core::tag::{IfdGroup, Tag};
use crate::types::rational::Rational;
use crate::types::value::{DataType, TagValue};

/// TIFF magic number following the byte order marker
pub(crate) const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub(crate) const TIFF_HEADER_SIZE: usize = 8;

/// Size of an IFD entry in bytes
pub(crate) const IFD_ENTRY_SIZE: usize = 12;

/// Decode the TIFF structure starting at `tiff_offset` within `bytes`.
///
/// All offsets inside the structure are relative to the TIFF header. Any
/// offset or count running past the end of `bytes` fails the whole decode;
/// no partial store is returned.
///
/// # Example
///
/// ```rust
/// use exifkit::{decode, encode, IfdGroup, TagStore, tag};
///
/// let mut store = TagStore::new();
/// store.set(TagStore::build(tag::MAKE, IfdGroup::Primary, "Canon").unwrap());
///
/// let bytes = encode(&store);
/// assert_eq!(decode(&bytes, 0).unwrap(), store);
/// ```
pub fn decode(bytes: &[u8], tiff_offset: usize) -> Result<TagStore, DecodeError> {
    ExifParser::new(bytes, tiff_offset)?.parse()
}

/// IFD Entry structure
struct IfdEntry {
    tag: u16,
    type_: u16,
    count: u32,
    /// Absolute offset of the 4-byte value/offset field
    value_field: usize,
}

/// Sub-directory and thumbnail locations collected while reading an IFD
#[derive(Default)]
struct Links {
    exif: Option<u32>,
    gps: Option<u32>,
    interop: Option<u32>,
    thumbnail_offset: Option<u32>,
    thumbnail_length: Option<u32>,
}

struct ExifParser<'a> {
    data: &'a [u8],
    /// Absolute offset of the TIFF header
    base: usize,
    byte_order: ByteOrder,
    visited: Vec<u32>,
}

impl<'a> ExifParser<'a> {
    fn new(data: &'a [u8], base: usize) -> Result<Self, DecodeError> {
        let header = slice(data, base, TIFF_HEADER_SIZE)?;

        let marker = [header[0], header[1]];
        let byte_order = ByteOrder::from_marker(marker).ok_or(DecodeError::BadByteOrder(marker))?;

        let magic = byte_order.read_u16(&header[2..4]);
        if magic != TIFF_MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }

        Ok(Self {
            data,
            base,
            byte_order,
            visited: Vec::new(),
        })
    }

    fn parse(mut self) -> Result<TagStore, DecodeError> {
        let mut store = TagStore::with_byte_order(self.byte_order);

        let header = slice(self.data, self.base, TIFF_HEADER_SIZE)?;
        let ifd0_offset = self.byte_order.read_u32(&header[4..8]);

        let (ifd0_links, next_ifd) = self.read_ifd(ifd0_offset, IfdGroup::Primary, &mut store, true)?;

        if let Some(exif_offset) = ifd0_links.exif {
            let (exif_links, _) = self.read_ifd(exif_offset, IfdGroup::Exif, &mut store, false)?;
            if let Some(interop_offset) = exif_links.interop {
                self.read_ifd(interop_offset, IfdGroup::Interoperability, &mut store, false)?;
            }
        }

        if let Some(gps_offset) = ifd0_links.gps {
            self.read_ifd(gps_offset, IfdGroup::Gps, &mut store, false)?;
        }

        if next_ifd != 0 {
            let (thumb_links, _) = self.read_ifd(next_ifd, IfdGroup::Thumbnail, &mut store, false)?;
            if let (Some(offset), Some(length)) =
                (thumb_links.thumbnail_offset, thumb_links.thumbnail_length)
            {
                if length > 0 {
                    let thumbnail = self.tiff_slice(offset, length as usize)?;
                    store.set_thumbnail(thumbnail.to_vec());
                }
            }
        }

        Ok(store)
    }

    /// Read one IFD into `store`, returning its links and next IFD offset.
    ///
    /// The next-IFD field is only read when `read_next` is set; sub-IFDs
    /// written by some cameras end without it.
    fn read_ifd(
        &mut self,
        offset: u32,
        group: IfdGroup,
        store: &mut TagStore,
        read_next: bool,
    ) -> Result<(Links, u32), DecodeError> {
        if self.visited.contains(&offset) {
            return Err(DecodeError::CircularIfd(offset));
        }
        self.visited.push(offset);

        let start = self.absolute(offset)?;
        let entry_count = self.byte_order.read_u16(slice(self.data, start, 2)?) as usize;
        let entries_start = start + 2;
        slice(self.data, entries_start, entry_count * IFD_ENTRY_SIZE)?;

        let mut links = Links::default();
        for index in 0..entry_count {
            let entry = self.read_ifd_entry(entries_start + index * IFD_ENTRY_SIZE)?;

            if is_structural(entry.tag, group) {
                self.record_link(&entry, group, &mut links)?;
                continue;
            }

            let Some(data_type) = DataType::from_code(entry.type_) else {
                log::debug!(
                    "Skipping tag {:#06x} in {} IFD: unsupported type {}",
                    entry.tag,
                    group,
                    entry.type_
                );
                continue;
            };

            let value = self.read_tag_value(&entry, data_type)?;
            store.set(Tag::new(entry.tag, group, value));
        }

        let next_ifd = if read_next {
            let next_field = entries_start + entry_count * IFD_ENTRY_SIZE;
            self.byte_order.read_u32(slice(self.data, next_field, 4)?)
        } else {
            0
        };

        Ok((links, next_ifd))
    }

    /// Read an IFD entry at an absolute offset
    fn read_ifd_entry(&self, at: usize) -> Result<IfdEntry, DecodeError> {
        let entry_bytes = slice(self.data, at, IFD_ENTRY_SIZE)?;
        Ok(IfdEntry {
            tag: self.byte_order.read_u16(&entry_bytes[0..2]),
            type_: self.byte_order.read_u16(&entry_bytes[2..4]),
            count: self.byte_order.read_u32(&entry_bytes[4..8]),
            value_field: at + 8,
        })
    }

    fn record_link(
        &self,
        entry: &IfdEntry,
        group: IfdGroup,
        links: &mut Links,
    ) -> Result<(), DecodeError> {
        let value = self.read_link_value(entry)?;
        match (group, entry.tag) {
            (IfdGroup::Primary, tag::EXIF_IFD_POINTER) => links.exif = value,
            (IfdGroup::Primary, tag::GPS_IFD_POINTER) => links.gps = value,
            (IfdGroup::Exif, tag::INTEROPERABILITY_IFD_POINTER) => links.interop = value,
            (IfdGroup::Thumbnail, tag::JPEG_INTERCHANGE_FORMAT) => links.thumbnail_offset = value,
            (IfdGroup::Thumbnail, tag::JPEG_INTERCHANGE_FORMAT_LENGTH) => {
                links.thumbnail_length = value
            }
            (IfdGroup::Thumbnail, tag::STRIP_OFFSETS | tag::STRIP_BYTE_COUNTS) => {
                log::warn!("Dropping uncompressed thumbnail strips: not supported");
            }
            _ => log::debug!("Ignoring structural tag {:#06x} in {} IFD", entry.tag, group),
        }
        Ok(())
    }

    /// First component of a SHORT or LONG pointer entry; zero means absent
    fn read_link_value(&self, entry: &IfdEntry) -> Result<Option<u32>, DecodeError> {
        if entry.count == 0 {
            return Ok(None);
        }
        let field = slice(self.data, entry.value_field, 4)?;
        let value = match DataType::from_code(entry.type_) {
            Some(DataType::Short) => self.byte_order.read_u16(field) as u32,
            Some(DataType::Long) | Some(DataType::SLong) | Some(DataType::Undefined) => {
                self.byte_order.read_u32(field)
            }
            _ => {
                log::debug!(
                    "Ignoring pointer tag {:#06x} with type {}",
                    entry.tag,
                    entry.type_
                );
                return Ok(None);
            }
        };
        Ok((value != 0).then_some(value))
    }

    /// Read tag value (handles inline values and offsets)
    fn read_tag_value(&self, entry: &IfdEntry, data_type: DataType) -> Result<TagValue, DecodeError> {
        let count = entry.count as usize;
        let data_size = count
            .checked_mul(data_type.component_size())
            .ok_or(DecodeError::Truncated {
                offset: entry.value_field,
                len: usize::MAX,
            })?;

        let raw = if data_size <= 4 {
            // Value is stored inline in value_or_offset field
            &slice(self.data, entry.value_field, 4)?[..data_size]
        } else {
            let field = slice(self.data, entry.value_field, 4)?;
            let value_offset = self.byte_order.read_u32(field);
            self.tiff_slice(value_offset, data_size)?
        };

        Ok(self.parse_components(raw, data_type))
    }

    fn parse_components(&self, raw: &[u8], data_type: DataType) -> TagValue {
        let order = self.byte_order;
        match data_type {
            DataType::Byte => TagValue::Byte(raw.to_vec()),
            DataType::Undefined => TagValue::Undefined(raw.to_vec()),
            DataType::Ascii => {
                let text = raw.split(|&b| b == 0).next().unwrap_or_default();
                TagValue::Ascii(String::from_utf8_lossy(text).into_owned())
            }
            DataType::Short => TagValue::Short(raw.chunks_exact(2).map(|c| order.read_u16(c)).collect()),
            DataType::Long => TagValue::Long(raw.chunks_exact(4).map(|c| order.read_u32(c)).collect()),
            DataType::SLong => TagValue::SLong(raw.chunks_exact(4).map(|c| order.read_i32(c)).collect()),
            DataType::Rational => TagValue::Rational(
                raw.chunks_exact(8)
                    .map(|c| {
                        Rational::new(order.read_u32(&c[0..4]) as i64, order.read_u32(&c[4..8]) as i64)
                    })
                    .collect(),
            ),
            DataType::SRational => TagValue::SRational(
                raw.chunks_exact(8)
                    .map(|c| {
                        Rational::new(order.read_i32(&c[0..4]) as i64, order.read_i32(&c[4..8]) as i64)
                    })
                    .collect(),
            ),
        }
    }

    /// Convert a TIFF-relative offset to an absolute one
    fn absolute(&self, offset: u32) -> Result<usize, DecodeError> {
        self.base
            .checked_add(offset as usize)
            .filter(|&abs| abs <= self.data.len())
            .ok_or(DecodeError::Truncated {
                offset: self.base.saturating_add(offset as usize),
                len: 0,
            })
    }

    fn tiff_slice(&self, offset: u32, len: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.absolute(offset)?;
        slice(self.data, start, len)
    }
}

/// Bounds-checked sub-slice
fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(DecodeError::Truncated { offset, len })
}
