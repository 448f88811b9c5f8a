//! EXIF File API
//!
//! This module provides a high-level API for working with EXIF metadata in
//! JPEG files: open, edit the [`TagStore`], write back.

use crate::core::error::{ExifError, ExifResult};
use crate::core::parser::decode;
use crate::core::serializer::encode;
use crate::core::store::TagStore;
use crate::files::jpeg::{ExifSegment, JpegSegmentEditor};
use crate::files::options::ExifOptions;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// High-level API for working with EXIF metadata in JPEG files
///
/// # File Update Behavior
///
/// When a file is opened with [`ExifOptions::for_update`], changes made via
/// [`ExifFile::tags_mut`] or [`ExifFile::put_tags`] are not written to disk
/// immediately. They are only written when [`ExifFile::close`] or
/// [`ExifFile::try_close`] is called.
///
/// # Example
///
/// ```rust,no_run
/// use exifkit::{ExifFile, ExifOptions, IfdGroup, TagStore, tag};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut file = ExifFile::new();
/// file.open_with("image.jpg", ExifOptions::default().for_update())?;
///
/// if let Some(store) = file.tags_mut() {
///     store.set(TagStore::build(tag::SOFTWARE, IfdGroup::Primary, "MyApp")?);
/// }
///
/// // Changes are written to disk when try_close() is called
/// file.try_close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExifFile {
    store: Option<TagStore>,
    /// Original file path
    file_path: Option<PathBuf>,
    /// Original JPEG bytes, kept when opened for update or from bytes
    file_data: Option<Vec<u8>>,
    /// Whether the source carried an EXIF segment
    had_exif: bool,
    options: ExifOptions,
    is_open: bool,
}

impl ExifFile {
    /// Create a new empty ExifFile
    ///
    /// Use `open()` or `from_*()` methods to load tags from a file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file from a path with options
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use exifkit::{ExifFile, ExifOptions};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut file = ExifFile::new();
    /// file.open_with("image.jpg", ExifOptions::default().for_update())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_with<P: AsRef<Path>>(&mut self, path: P, options: ExifOptions) -> ExifResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        self.from_reader_with(file, options)?;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Open a file from a path, read-only
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> ExifResult<()> {
        self.open_with(path, ExifOptions::default())
    }

    /// Open JPEG data held in memory.
    ///
    /// The bytes are kept, so [`ExifFile::write_to_bytes`] works without
    /// [`ExifOptions::for_update`].
    pub fn from_bytes(&mut self, data: &[u8]) -> ExifResult<()> {
        self.from_bytes_with(data, ExifOptions::default())
    }

    pub fn from_bytes_with(&mut self, data: &[u8], options: ExifOptions) -> ExifResult<()> {
        self.from_reader_with(Cursor::new(data), options.for_update())?;
        self.options = options;
        Ok(())
    }

    /// Open JPEG data from a reader, read-only
    pub fn from_reader<R: Read>(&mut self, reader: R) -> ExifResult<()> {
        self.from_reader_with(reader, ExifOptions::default())
    }

    /// Open JPEG data from a reader with options.
    ///
    /// Read-only access only consumes the header segments; update access
    /// buffers the whole stream for writing back later.
    pub fn from_reader_with<R: Read>(&mut self, mut reader: R, options: ExifOptions) -> ExifResult<()> {
        // Reset state before opening (in case of retry)
        self.store = None;
        self.file_path = None;
        self.file_data = None;
        self.had_exif = false;
        self.is_open = false;
        self.options = options;

        let payload = if options.for_update {
            let mut file_data = Vec::new();
            reader.read_to_end(&mut file_data)?;
            let payload = match JpegSegmentEditor::locate_exif_segment(&file_data)? {
                ExifSegment::Found(region) => {
                    Some(JpegSegmentEditor::exif_payload(&file_data, region)?.to_vec())
                }
                ExifSegment::NotFound => None,
            };
            self.file_data = Some(file_data);
            payload
        } else {
            JpegSegmentEditor::read_exif_payload(reader)?
        };

        self.had_exif = payload.is_some();
        self.store = Some(Self::load_store(payload.as_deref(), &options)?);
        self.is_open = true;
        Ok(())
    }

    fn load_store(payload: Option<&[u8]>, options: &ExifOptions) -> ExifResult<TagStore> {
        let Some(payload) = payload else {
            return Ok(TagStore::with_byte_order(options.byte_order));
        };
        match decode(payload, 0) {
            Ok(store) => Ok(store),
            Err(e) if options.strict => Err(e.into()),
            Err(e) => {
                log::warn!("Ignoring undecodable EXIF segment: {}", e);
                Ok(TagStore::with_byte_order(options.byte_order))
            }
        }
    }

    /// Get the tags
    ///
    /// Returns `None` if no file has been loaded.
    pub fn tags(&self) -> Option<&TagStore> {
        self.store.as_ref()
    }

    /// Get mutable reference to the tags
    pub fn tags_mut(&mut self) -> Option<&mut TagStore> {
        self.store.as_mut()
    }

    /// Replace the tags. Written to disk on close when opened for update.
    pub fn put_tags(&mut self, store: TagStore) {
        self.store = Some(store);
    }

    /// Whether the loaded JPEG carried an EXIF segment
    pub fn has_exif_segment(&self) -> bool {
        self.had_exif
    }

    /// Explicitly closes an opened file, ignoring errors.
    ///
    /// Use [`ExifFile::try_close`] to handle write failures.
    pub fn close(&mut self) {
        let _ = self.try_close();
    }

    /// Explicitly closes an opened file with error handling.
    ///
    /// Files that are opened for update are written to only when closing.
    pub fn try_close(&mut self) -> ExifResult<()> {
        if !self.is_open {
            return Ok(());
        }

        if self.options.for_update {
            if let Some(path) = self.file_path.clone() {
                self.save(path)?;
            }
        }

        self.is_open = false;
        Ok(())
    }

    /// Write the JPEG with the current tags to a file path, returning the
    /// number of bytes written.
    ///
    /// The output is fully built before the file is opened, so a failed
    /// encode leaves an existing file untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ExifResult<u64> {
        use std::fs::File;
        use std::io::BufWriter;

        let path = path.as_ref();
        let result = self.write_to_bytes().and_then(|bytes| {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(&bytes)?;
            writer.flush()?;
            Ok(bytes.len() as u64)
        });
        if let Err(e) = &result {
            log::error!("Failed to write {}: {}", path.display(), e);
        }
        result
    }

    /// Write the JPEG with the current tags to bytes
    pub fn write_to_bytes(&self) -> ExifResult<Vec<u8>> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ExifError::MissingData("No EXIF tags available for writing".to_string()))?;

        // Get original file data
        let file_data = self.file_data.as_ref().ok_or_else(|| {
            ExifError::MissingData(
                "Original file data not available for writing. \
                To write EXIF metadata, open the file with ExifOptions::for_update()."
                    .to_string(),
            )
        })?;

        let payload = encode(store);
        Ok(JpegSegmentEditor::write_exif(file_data, &payload)?)
    }

    /// Write the JPEG with the current tags to a writer, returning the
    /// number of bytes written.
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> ExifResult<u64> {
        let bytes = self.write_to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definitions::tag;
    use crate::core::error::SegmentError;
    use crate::core::tag::IfdGroup;
    use crate::types::TagValue;

    fn create_minimal_jpeg() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xD9]
    }

    #[test]
    fn test_new() {
        let file = ExifFile::new();
        assert!(file.tags().is_none());
        assert!(!file.has_exif_segment());
    }

    #[test]
    fn test_from_bytes_empty() {
        let mut file = ExifFile::new();
        // Empty data is not a JPEG
        let result = file.from_bytes(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_bytes_without_exif() {
        let mut file = ExifFile::new();
        file.from_bytes(&create_minimal_jpeg()).unwrap();
        assert!(!file.has_exif_segment());
        assert!(file.tags().unwrap().is_empty());
    }

    #[test]
    fn test_put_and_write_tags() {
        let mut file = ExifFile::new();
        file.from_bytes(&create_minimal_jpeg()).unwrap();

        let mut store = TagStore::new();
        store.set(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 6u16).unwrap());
        file.put_tags(store.clone());

        let bytes = file.write_to_bytes().unwrap();
        let mut reopened = ExifFile::new();
        reopened.from_bytes(&bytes).unwrap();
        assert!(reopened.has_exif_segment());
        assert_eq!(reopened.tags(), Some(&store));
    }

    #[test]
    fn test_read_only_reader_cannot_write() {
        let mut file = ExifFile::new();
        file.from_reader(Cursor::new(create_minimal_jpeg())).unwrap();
        assert!(matches!(file.write_to_bytes(), Err(ExifError::MissingData(_))));
    }

    #[test]
    fn test_lenient_and_strict_decode() {
        let jpeg = JpegSegmentEditor::insert_new(&create_minimal_jpeg(), b"XX\0*").unwrap();

        let mut file = ExifFile::new();
        file.from_bytes(&jpeg).unwrap();
        assert!(file.has_exif_segment());
        assert!(file.tags().unwrap().is_empty());

        let result = file.from_bytes_with(&jpeg, ExifOptions::default().strict());
        assert!(matches!(result, Err(ExifError::Decode(_))));
    }

    #[test]
    fn test_failed_close_keeps_original_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, create_minimal_jpeg()).unwrap();

        let mut file = ExifFile::new();
        file.open_with(&path, ExifOptions::default().for_update()).unwrap();
        file.tags_mut().unwrap().set(
            TagStore::build(tag::MAKER_NOTE, IfdGroup::Exif, TagValue::Undefined(vec![0; 70_000]))
                .unwrap(),
        );

        let result = file.try_close();
        assert!(matches!(
            result,
            Err(ExifError::Segment(SegmentError::SegmentTooLarge(_)))
        ));
        assert_eq!(std::fs::read(&path).unwrap(), create_minimal_jpeg());

        // Saving elsewhere fails the same way without creating the file
        let other = dir.path().join("other.jpg");
        assert!(file.save(&other).is_err());
        assert!(!other.exists());
    }
}
