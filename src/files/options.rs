//! Options for EXIF file operations

use crate::core::byte_order::ByteOrder;

/// Options for EXIF file operations.
///
/// Use the builder pattern to configure options.
///
/// # Example
///
/// ```rust,no_run
/// use exifkit::{ExifFile, ExifOptions};
///
/// let mut file = ExifFile::new();
/// // Open for update with strict mode
/// file.open_with("photo.jpg", ExifOptions::default().for_update().strict())?;
/// // ... modify tags ...
/// file.try_close()?;
/// # Ok::<(), exifkit::ExifError>(())
/// ```
#[derive(Default, Clone, Copy, Debug)]
pub struct ExifOptions {
    /// Open for reading and writing (default: read-only)
    pub for_update: bool,
    /// Fail on an undecodable EXIF segment instead of starting empty
    pub strict: bool,
    /// Byte order of the store created for files without EXIF
    pub byte_order: ByteOrder,
}

impl ExifOptions {
    /// Open for read-only access (default).
    pub fn for_read(mut self) -> Self {
        self.for_update = false;
        self
    }

    /// Open for reading and writing.
    ///
    /// Files opened for update are written to only when closing.
    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// Treat a corrupt EXIF segment as an error.
    ///
    /// By default a segment that fails to decode is logged and replaced by
    /// an empty store.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }
}
