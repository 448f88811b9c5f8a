//! JPEG APP1 segment editing
//!
//! Locates, extracts, inserts and replaces the EXIF APP1 segment of a JPEG
//! byte stream. Everything outside the EXIF segment is copied through
//! untouched; image data is never decoded.
//!
//! JPEG EXIF Storage:
//! - EXIF is stored in an APP1 segment (`FF E1`) whose payload starts with
//!   the signature `Exif\0\0`, followed by a TIFF structure
//! - The big-endian segment length counts itself, the signature and the
//!   TIFF bytes, so the TIFF payload is limited to 65527 bytes

use crate::core::error::{ExifResult, SegmentError};
use std::io::{ErrorKind, Read};
use std::ops::Range;

/// JPEG segment markers
const MARKER_SOI: u8 = 0xD8; // Start of Image
const MARKER_APP1: u8 = 0xE1;
const MARKER_SOS: u8 = 0xDA; // Start of Scan
const MARKER_EOI: u8 = 0xD9; // End of Image
const MARKER_TEM: u8 = 0x01;

/// Exif signature in APP1 segment
pub const EXIF_SIGNATURE: &[u8] = b"Exif\0\x00";
const EXIF_SIGNATURE_ALT: &[u8] = b"Exif\0\xFF";
const EXIF_SIGNATURE_LENGTH: usize = 6;

/// Marker (2) + length field (2)
const SEGMENT_HEADER_LENGTH: usize = 4;

/// Largest value of the segment length field
const MAX_SEGMENT_LENGTH: usize = 0xFFFF;

/// Largest TIFF payload that fits a single APP1 segment
pub const MAX_EXIF_PAYLOAD: usize = MAX_SEGMENT_LENGTH - 2 - EXIF_SIGNATURE_LENGTH;

/// Byte range of an EXIF APP1 segment, from its `0xFF` marker byte to the
/// end of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRegion {
    pub start: usize,
    pub end: usize,
}

impl SegmentRegion {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Offset of the TIFF header within the JPEG stream
    pub fn tiff_offset(&self) -> usize {
        self.start + SEGMENT_HEADER_LENGTH + EXIF_SIGNATURE_LENGTH
    }

    /// Range of the TIFF payload within the JPEG stream
    pub fn payload_range(&self) -> Range<usize> {
        self.tiff_offset()..self.end
    }
}

/// Outcome of scanning a JPEG stream for its EXIF segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifSegment {
    Found(SegmentRegion),
    /// Start of scan, end of image or end of data reached first
    NotFound,
}

impl ExifSegment {
    pub fn region(self) -> Option<SegmentRegion> {
        match self {
            ExifSegment::Found(region) => Some(region),
            ExifSegment::NotFound => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, ExifSegment::Found(_))
    }
}

/// Stateless editor for the EXIF segment of in-memory JPEG data
#[derive(Debug, Clone, Copy)]
pub struct JpegSegmentEditor;

impl JpegSegmentEditor {
    /// Check for the SOI marker at offset 0
    pub fn is_jpeg(bytes: &[u8]) -> bool {
        bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == MARKER_SOI
    }

    /// Scan the marker sequence for the first EXIF APP1 segment.
    ///
    /// Fill bytes (`0xFF` runs) and standalone markers are skipped. Scanning
    /// stops at start of scan or end of image.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exifkit::{ExifSegment, JpegSegmentEditor};
    ///
    /// let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
    /// assert_eq!(
    ///     JpegSegmentEditor::locate_exif_segment(&jpeg).unwrap(),
    ///     ExifSegment::NotFound
    /// );
    /// ```
    pub fn locate_exif_segment(bytes: &[u8]) -> Result<ExifSegment, SegmentError> {
        if !Self::is_jpeg(bytes) {
            return Err(SegmentError::NotAJpeg);
        }

        let mut pos = 2;
        loop {
            if pos >= bytes.len() {
                return Ok(ExifSegment::NotFound);
            }
            if bytes[pos] != 0xFF {
                return Err(SegmentError::MalformedMarker { offset: pos });
            }

            // Skip 0xFF padding, stopping on the last 0xFF before the marker id
            while pos + 1 < bytes.len() && bytes[pos + 1] == 0xFF {
                pos += 1;
            }
            let Some(&marker) = bytes.get(pos + 1) else {
                return Err(SegmentError::MalformedMarker { offset: pos });
            };

            match marker {
                MARKER_SOS | MARKER_EOI => return Ok(ExifSegment::NotFound),
                0x00 => return Err(SegmentError::MalformedMarker { offset: pos }),
                MARKER_TEM | 0xD0..=0xD7 => {
                    pos += 2;
                    continue;
                }
                _ => {}
            }

            let length_at = pos + 2;
            let length = bytes
                .get(length_at..length_at + 2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]) as usize)
                .filter(|&length| length >= 2)
                .ok_or(SegmentError::MalformedMarker { offset: pos })?;
            let end = length_at + length;
            if end > bytes.len() {
                return Err(SegmentError::MalformedMarker { offset: pos });
            }

            if marker == MARKER_APP1 && Self::is_exif_segment(&bytes[length_at + 2..end]) {
                return Ok(ExifSegment::Found(SegmentRegion { start: pos, end }));
            }
            pos = end;
        }
    }

    /// The TIFF payload of a located EXIF segment
    pub fn exif_payload(bytes: &[u8], region: SegmentRegion) -> Result<&[u8], SegmentError> {
        Self::validate_region(bytes, region)?;
        Ok(&bytes[region.payload_range()])
    }

    /// Build a complete APP1 segment (marker, length, signature, payload)
    pub fn build_app1_segment(payload: &[u8]) -> Result<Vec<u8>, SegmentError> {
        if payload.len() > MAX_EXIF_PAYLOAD {
            return Err(SegmentError::SegmentTooLarge(payload.len()));
        }

        let mut segment = Vec::with_capacity(SEGMENT_HEADER_LENGTH + EXIF_SIGNATURE_LENGTH + payload.len());
        segment.extend_from_slice(&[0xFF, MARKER_APP1]);
        // Segment length (signature + data + 2 bytes for length)
        let segment_length = (EXIF_SIGNATURE_LENGTH + payload.len() + 2) as u16;
        segment.extend_from_slice(&segment_length.to_be_bytes());
        segment.extend_from_slice(EXIF_SIGNATURE);
        segment.extend_from_slice(payload);
        Ok(segment)
    }

    /// Insert a new EXIF segment directly after SOI.
    ///
    /// Fails with [`SegmentError::ExifAlreadyPresent`] when the stream already
    /// carries one; use [`JpegSegmentEditor::replace_existing`] instead.
    pub fn insert_new(bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>, SegmentError> {
        if Self::locate_exif_segment(bytes)?.is_found() {
            return Err(SegmentError::ExifAlreadyPresent);
        }

        let segment = Self::build_app1_segment(payload)?;
        let mut out = Vec::with_capacity(bytes.len() + segment.len());
        out.extend_from_slice(&bytes[..2]);
        out.extend_from_slice(&segment);
        out.extend_from_slice(&bytes[2..]);
        Ok(out)
    }

    /// Replace the segment at `region` with a new EXIF segment carrying
    /// `payload`. Bytes before and after the region are preserved exactly.
    pub fn replace_existing(
        bytes: &[u8],
        region: SegmentRegion,
        payload: &[u8],
    ) -> Result<Vec<u8>, SegmentError> {
        Self::validate_region(bytes, region)?;
        let segment = Self::build_app1_segment(payload)?;

        let mut out = Vec::with_capacity(bytes.len() - region.len() + segment.len());
        out.extend_from_slice(&bytes[..region.start]);
        out.extend_from_slice(&segment);
        out.extend_from_slice(&bytes[region.end..]);
        Ok(out)
    }

    /// Insert or replace, whichever applies
    pub fn write_exif(bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>, SegmentError> {
        match Self::locate_exif_segment(bytes)? {
            ExifSegment::Found(region) => Self::replace_existing(bytes, region, payload),
            ExifSegment::NotFound => Self::insert_new(bytes, payload),
        }
    }

    /// Remove the EXIF segment, if any. Returns the input unchanged when
    /// there is none.
    pub fn remove_exif(bytes: &[u8]) -> Result<Vec<u8>, SegmentError> {
        match Self::locate_exif_segment(bytes)? {
            ExifSegment::Found(region) => {
                let mut out = Vec::with_capacity(bytes.len() - region.len());
                out.extend_from_slice(&bytes[..region.start]);
                out.extend_from_slice(&bytes[region.end..]);
                Ok(out)
            }
            ExifSegment::NotFound => Ok(bytes.to_vec()),
        }
    }

    /// Read the TIFF payload of the EXIF segment from a stream, stopping at
    /// start of scan.
    ///
    /// Only the header segments are read, so this works on large files and
    /// non-seekable sources.
    pub fn read_exif_payload<R: Read>(reader: R) -> ExifResult<Option<Vec<u8>>> {
        let mut reader = MarkerReader::new(reader);

        // Check JPEG file header (SOI marker)
        let mut header = [0u8; 2];
        if reader.read_exact(&mut header).is_err() || header[0] != 0xFF || header[1] != MARKER_SOI {
            return Err(SegmentError::NotAJpeg.into());
        }

        loop {
            let Some((marker, offset)) = reader.find_marker()? else {
                return Ok(None);
            };
            match marker {
                MARKER_SOS | MARKER_EOI => return Ok(None),
                MARKER_TEM | 0xD0..=0xD7 => continue,
                _ => {}
            }

            let length = reader
                .read_segment_length()
                .map_err(|e| truncated(e, offset))?;
            if length < 2 {
                return Err(SegmentError::MalformedMarker { offset }.into());
            }
            let content_len = length as usize - 2;

            if marker == MARKER_APP1 && content_len >= EXIF_SIGNATURE_LENGTH {
                let mut data = vec![0u8; content_len];
                reader.read_exact(&mut data).map_err(|e| truncated(e, offset))?;
                if Self::is_exif_segment(&data) {
                    data.drain(..EXIF_SIGNATURE_LENGTH);
                    return Ok(Some(data));
                }
            } else {
                reader.skip(content_len).map_err(|e| truncated(e, offset))?;
            }
        }
    }

    /// Check if a segment payload starts with the Exif signature
    fn is_exif_segment(segment_data: &[u8]) -> bool {
        segment_data.starts_with(EXIF_SIGNATURE) || segment_data.starts_with(EXIF_SIGNATURE_ALT)
    }

    fn validate_region(bytes: &[u8], region: SegmentRegion) -> Result<(), SegmentError> {
        if !Self::is_jpeg(bytes) {
            return Err(SegmentError::NotAJpeg);
        }

        let invalid = SegmentError::InvalidRegion {
            start: region.start,
            end: region.end,
        };
        if region.start < 2
            || region.end > bytes.len()
            || region.start + SEGMENT_HEADER_LENGTH + EXIF_SIGNATURE_LENGTH > region.end
        {
            return Err(invalid);
        }

        let segment = &bytes[region.start..region.end];
        let declared = u16::from_be_bytes([segment[2], segment[3]]) as usize;
        if segment[0] != 0xFF
            || segment[1] != MARKER_APP1
            || declared + 2 != segment.len()
            || !Self::is_exif_segment(&segment[SEGMENT_HEADER_LENGTH..])
        {
            return Err(invalid);
        }
        Ok(())
    }
}

/// An I/O error inside a segment means the segment runs past the data
fn truncated(error: std::io::Error, offset: usize) -> crate::core::error::ExifError {
    if error.kind() == ErrorKind::UnexpectedEof {
        SegmentError::MalformedMarker { offset }.into()
    } else {
        error.into()
    }
}

/// Reader wrapper tracking the stream position for error reporting
struct MarkerReader<R> {
    inner: R,
    position: usize,
}

impl<R: Read> MarkerReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        self.inner.read_exact(buf)?;
        self.position += buf.len();
        Ok(())
    }

    /// Find the next JPEG marker, returning it with the offset of its 0xFF.
    ///
    /// `None` when the data ends exactly at a segment boundary. Anything other
    /// than fill bytes and a marker id at the boundary is malformed.
    fn find_marker(&mut self) -> ExifResult<Option<(u8, usize)>> {
        let mut buffer = [0u8; 1];
        match self.read_exact(&mut buffer) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        let mut offset = self.position - 1;
        if buffer[0] != 0xFF {
            return Err(SegmentError::MalformedMarker { offset }.into());
        }

        // Fill bytes
        loop {
            self.read_exact(&mut buffer).map_err(|e| truncated(e, offset))?;
            match buffer[0] {
                0xFF => offset = self.position - 1,
                0x00 => return Err(SegmentError::MalformedMarker { offset }.into()),
                marker => return Ok(Some((marker, offset))),
            }
        }
    }

    /// Read segment length (2 bytes, big-endian)
    fn read_segment_length(&mut self) -> std::io::Result<u16> {
        let mut length_bytes = [0u8; 2];
        self.read_exact(&mut length_bytes)?;
        Ok(u16::from_be_bytes(length_bytes))
    }

    fn skip(&mut self, len: usize) -> std::io::Result<()> {
        let copied = std::io::copy(&mut (&mut self.inner).take(len as u64), &mut std::io::sink())?;
        self.position += copied as usize;
        if (copied as usize) < len {
            return Err(ErrorKind::UnexpectedEof.into());
        }
        Ok(())
    }
}
