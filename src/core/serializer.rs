//! EXIF encoder
//!
//! Lays out a [`TagStore`] as a TIFF structure. The output is deterministic:
//!
//! - 8-byte header in the store's byte order, IFD0 at offset 8
//! - IFDs in the order IFD0, Exif, GPS, Interoperability, IFD1, each with
//!   its entries sorted by tag id
//! - the data area for values longer than 4 bytes, in IFD order, each value
//!   padded to an even length
//! - the thumbnail bytes, if any
//!
//! Pointer tags and thumbnail offsets are synthesized here; any such tag
//! held by the store is ignored.

use crate::core::byte_order::ByteOrder;
use crate::core::definitions::{is_structural, tag};
use crate::core::parser::{IFD_ENTRY_SIZE, TIFF_HEADER_SIZE, TIFF_MAGIC};
use crate::core::store::TagStore;
use crate::core::tag::IfdGroup;
use crate::types::value::{DataType, TagValue};

/// Encode a store as a TIFF byte sequence.
///
/// Decoding the result yields a store equal to the input (structural tags
/// aside).
pub fn encode(store: &TagStore) -> Vec<u8> {
    ExifSerializer::new(store).serialize()
}

/// Values resolved only once the layout is known
#[derive(Clone, Copy)]
enum Link {
    Ifd(IfdGroup),
    Thumbnail,
}

struct Entry {
    tag: u16,
    data_type: DataType,
    count: u32,
    payload: Vec<u8>,
    link: Option<Link>,
    /// Offset in the data area, for payloads longer than 4 bytes
    data_offset: u32,
}

impl Entry {
    fn pointer(tag: u16, link: Link) -> Self {
        Self {
            tag,
            data_type: DataType::Long,
            count: 1,
            payload: Vec::new(),
            link: Some(link),
            data_offset: 0,
        }
    }
}

struct Directory {
    group: IfdGroup,
    entries: Vec<Entry>,
    offset: u32,
}

struct ExifSerializer<'a> {
    store: &'a TagStore,
    byte_order: ByteOrder,
}

impl<'a> ExifSerializer<'a> {
    fn new(store: &'a TagStore) -> Self {
        Self {
            store,
            byte_order: store.byte_order(),
        }
    }

    fn serialize(self) -> Vec<u8> {
        let thumbnail = self.store.thumbnail().filter(|jpeg| !jpeg.is_empty());
        let mut directories = self.collect_directories(thumbnail);

        // Directories first, then the data area
        let mut offset = TIFF_HEADER_SIZE as u32;
        for dir in &mut directories {
            dir.offset = offset;
            offset += (2 + dir.entries.len() * IFD_ENTRY_SIZE + 4) as u32;
        }
        for entry in directories.iter_mut().flat_map(|dir| dir.entries.iter_mut()) {
            if entry.link.is_none() && entry.payload.len() > 4 {
                entry.data_offset = offset;
                offset += padded_len(entry.payload.len()) as u32;
            }
        }
        let thumbnail_offset = offset;

        let ifd_offset = |group: IfdGroup| {
            directories
                .iter()
                .find(|dir| dir.group == group)
                .map_or(0, |dir| dir.offset)
        };

        let order = self.byte_order;
        let mut out = Vec::with_capacity(offset as usize + thumbnail.map_or(0, <[u8]>::len));
        out.extend_from_slice(&order.marker());
        out.extend_from_slice(&order.write_u16(TIFF_MAGIC));
        out.extend_from_slice(&order.write_u32(TIFF_HEADER_SIZE as u32));

        for dir in &directories {
            out.extend_from_slice(&order.write_u16(dir.entries.len() as u16));
            for entry in &dir.entries {
                out.extend_from_slice(&order.write_u16(entry.tag));
                out.extend_from_slice(&order.write_u16(entry.data_type.code()));
                out.extend_from_slice(&order.write_u32(entry.count));
                match entry.link {
                    Some(Link::Ifd(group)) => out.extend_from_slice(&order.write_u32(ifd_offset(group))),
                    Some(Link::Thumbnail) => out.extend_from_slice(&order.write_u32(thumbnail_offset)),
                    None if entry.payload.len() > 4 => {
                        out.extend_from_slice(&order.write_u32(entry.data_offset))
                    }
                    None => {
                        let mut field = [0u8; 4];
                        field[..entry.payload.len()].copy_from_slice(&entry.payload);
                        out.extend_from_slice(&field);
                    }
                }
            }

            // Only IFD0 links onward, to IFD1
            let next = match dir.group {
                IfdGroup::Primary => ifd_offset(IfdGroup::Thumbnail),
                _ => 0,
            };
            out.extend_from_slice(&order.write_u32(next));
        }

        for entry in directories.iter().flat_map(|dir| dir.entries.iter()) {
            if entry.link.is_none() && entry.payload.len() > 4 {
                out.extend_from_slice(&entry.payload);
                if entry.payload.len() % 2 == 1 {
                    out.push(0);
                }
            }
        }

        if let Some(thumbnail) = thumbnail {
            out.extend_from_slice(thumbnail);
        }

        log::debug!(
            "Encoded {} tags in {} IFDs ({} bytes)",
            self.store.len(),
            directories.len(),
            out.len()
        );
        out
    }

    fn collect_directories(&self, thumbnail: Option<&[u8]>) -> Vec<Directory> {
        let store = self.store;
        let has_interop = store.has_group(IfdGroup::Interoperability);
        let has_exif = store.has_group(IfdGroup::Exif) || has_interop;
        let has_gps = store.has_group(IfdGroup::Gps);
        let has_thumbnail = store.has_group(IfdGroup::Thumbnail) || thumbnail.is_some();

        IfdGroup::ALL
            .into_iter()
            .filter(|&group| match group {
                IfdGroup::Primary => true,
                IfdGroup::Exif => has_exif,
                IfdGroup::Gps => has_gps,
                IfdGroup::Interoperability => has_interop,
                IfdGroup::Thumbnail => has_thumbnail,
            })
            .map(|group| {
                let mut entries: Vec<Entry> = store
                    .tags_in(group)
                    .filter(|tag| {
                        let structural = is_structural(tag.id(), group);
                        if structural {
                            log::debug!(
                                "Ignoring stored structural tag {:#06x} in {} IFD",
                                tag.id(),
                                group
                            );
                        }
                        !structural
                    })
                    .map(|tag| Entry {
                        tag: tag.id(),
                        data_type: tag.data_type(),
                        count: tag.component_count() as u32,
                        payload: encode_value(tag.value(), self.byte_order),
                        link: None,
                        data_offset: 0,
                    })
                    .collect();

                match group {
                    IfdGroup::Primary => {
                        if has_exif {
                            entries.push(Entry::pointer(tag::EXIF_IFD_POINTER, Link::Ifd(IfdGroup::Exif)));
                        }
                        if has_gps {
                            entries.push(Entry::pointer(tag::GPS_IFD_POINTER, Link::Ifd(IfdGroup::Gps)));
                        }
                    }
                    IfdGroup::Exif if has_interop => {
                        entries.push(Entry::pointer(
                            tag::INTEROPERABILITY_IFD_POINTER,
                            Link::Ifd(IfdGroup::Interoperability),
                        ));
                    }
                    IfdGroup::Thumbnail => {
                        if let Some(thumbnail) = thumbnail {
                            entries.push(Entry::pointer(tag::JPEG_INTERCHANGE_FORMAT, Link::Thumbnail));
                            entries.push(Entry {
                                tag: tag::JPEG_INTERCHANGE_FORMAT_LENGTH,
                                data_type: DataType::Long,
                                count: 1,
                                payload: self.byte_order.write_u32(thumbnail.len() as u32).to_vec(),
                                link: None,
                                data_offset: 0,
                            });
                        }
                    }
                    _ => {}
                }

                entries.sort_by_key(|entry| entry.tag);
                Directory {
                    group,
                    entries,
                    offset: 0,
                }
            })
            .collect()
    }
}

fn padded_len(len: usize) -> usize {
    len + (len & 1)
}

/// Serialize a value's components in the given byte order
fn encode_value(value: &TagValue, order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.byte_len());
    match value {
        TagValue::Byte(bytes) | TagValue::Undefined(bytes) => out.extend_from_slice(bytes),
        TagValue::Ascii(text) => {
            out.extend_from_slice(text.as_bytes());
            out.push(0);
        }
        TagValue::Short(values) => values.iter().for_each(|&v| out.extend_from_slice(&order.write_u16(v))),
        TagValue::Long(values) => values.iter().for_each(|&v| out.extend_from_slice(&order.write_u32(v))),
        TagValue::SLong(values) => values.iter().for_each(|&v| out.extend_from_slice(&order.write_i32(v))),
        TagValue::Rational(values) => {
            for r in values {
                out.extend_from_slice(&order.write_u32(r.numerator() as u32));
                out.extend_from_slice(&order.write_u32(r.denominator() as u32));
            }
        }
        TagValue::SRational(values) => {
            for r in values {
                out.extend_from_slice(&order.write_i32(r.numerator() as i32));
                out.extend_from_slice(&order.write_i32(r.denominator() as i32));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::decode;
    use crate::core::tag::Tag;
    use crate::types::rational::Rational;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_store_layout() {
        let bytes = encode(&TagStore::new());
        // Header + an empty IFD0
        assert_eq!(
            bytes,
            vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_inline_and_offset_values() {
        let mut store = TagStore::with_byte_order(ByteOrder::LittleEndian);
        store.set(Tag::new(tag::ORIENTATION, IfdGroup::Primary, TagValue::Short(vec![6])));
        store.set(Tag::new(tag::MAKE, IfdGroup::Primary, TagValue::Ascii("Canon".into())));

        let bytes = encode(&store);
        assert_eq!(&bytes[0..8], &[b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[8..10], &[0x02, 0x00]);
        // Sorted: Make (0x010F) before Orientation (0x0112)
        assert_eq!(&bytes[10..12], &[0x0F, 0x01]);
        // Make points past the directory: 8 + 2 + 24 + 4 = 38
        assert_eq!(&bytes[18..22], &[0x26, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[22..24], &[0x12, 0x01]);
        assert_eq!(&bytes[30..34], &[0x06, 0x00, 0x00, 0x00]);
        // "Canon\0" is already even
        assert_eq!(&bytes[38..], b"Canon\0");
    }

    #[test]
    fn test_odd_values_are_padded() {
        let mut store = TagStore::new();
        store.set(Tag::new(tag::MODEL, IfdGroup::Primary, TagValue::Ascii("EOS R".into())));
        store.set(Tag::new(tag::SOFTWARE, IfdGroup::Primary, TagValue::Ascii("v1.0".into())));

        let bytes = encode(&store);
        // 8 + 2 + 24 + 4 = 38; "EOS R\0" (6) then "v1.0\0" (5 + 1 pad)
        assert_eq!(bytes.len(), 38 + 6 + 6);
        assert_eq!(bytes.last(), Some(&0));
        assert_eq!(decode(&bytes, 0).unwrap(), store);
    }

    #[test]
    fn test_sub_ifds_are_linked() {
        let mut store = TagStore::new();
        store.set(Tag::new(tag::INTEROPERABILITY_INDEX, IfdGroup::Interoperability, TagValue::Ascii("R98".into())));
        store.set(Tag::new(
            tag::GPS_LATITUDE,
            IfdGroup::Gps,
            TagValue::Rational(vec![Rational::new(37, 1), Rational::new(25, 1), Rational::new(0, 1)]),
        ));

        let decoded = decode(&encode(&store), 0).unwrap();
        // Interop alone still forces an (empty) Exif IFD
        assert!(!decoded.has_group(IfdGroup::Exif));
        assert_eq!(decoded, store);
    }

    #[test]
    fn test_thumbnail_round_trip() {
        let mut store = TagStore::new();
        store.set(Tag::new(tag::ORIENTATION, IfdGroup::Primary, TagValue::Short(vec![1])));
        store.set(Tag::new(tag::COMPRESSION, IfdGroup::Thumbnail, TagValue::Short(vec![6])));
        store.set_thumbnail(vec![0xFF, 0xD8, 0xFF, 0xD9, 0x00]);

        let bytes = encode(&store);
        assert!(bytes.ends_with(&[0xFF, 0xD8, 0xFF, 0xD9, 0x00]));
        assert_eq!(decode(&bytes, 0).unwrap(), store);
    }

    #[test]
    fn test_empty_thumbnail_is_not_written() {
        let mut store = TagStore::new();
        store.set(Tag::new(tag::ORIENTATION, IfdGroup::Primary, TagValue::Short(vec![1])));
        store.set_thumbnail(Vec::new());
        assert_eq!(store.thumbnail(), None);

        let bytes = encode(&store);
        let decoded = decode(&bytes, 0).unwrap();
        assert!(!decoded.has_group(IfdGroup::Thumbnail));
        assert_eq!(decoded, store);

        // An empty thumbnail also clears an earlier one
        store.set_thumbnail(vec![0xFF, 0xD8, 0xFF, 0xD9]);
        store.set_thumbnail(Vec::new());
        assert_eq!(encode(&store), bytes);
    }

    #[test]
    fn test_structural_tags_in_store_are_ignored() {
        let mut store = TagStore::new();
        store.set(Tag::new(tag::EXIF_IFD_POINTER, IfdGroup::Primary, TagValue::Long(vec![9999])));

        let bytes = encode(&store);
        assert_eq!(bytes, encode(&TagStore::new()));
    }
}
