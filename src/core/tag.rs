//! EXIF tags and IFD groups

use crate::types::value::{DataType, TagValue};
use std::fmt;

/// The image file directory a tag lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IfdGroup {
    /// IFD0, the primary image
    Primary,
    /// Exif sub-IFD, linked from IFD0
    Exif,
    /// GPS sub-IFD, linked from IFD0
    Gps,
    /// Interoperability sub-IFD, linked from the Exif IFD
    Interoperability,
    /// IFD1, the thumbnail image
    Thumbnail,
}

impl IfdGroup {
    /// All groups in the order they are laid out when encoding
    pub const ALL: [IfdGroup; 5] = [
        IfdGroup::Primary,
        IfdGroup::Exif,
        IfdGroup::Gps,
        IfdGroup::Interoperability,
        IfdGroup::Thumbnail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IfdGroup::Primary => "primary",
            IfdGroup::Exif => "Exif",
            IfdGroup::Gps => "GPS",
            IfdGroup::Interoperability => "interoperability",
            IfdGroup::Thumbnail => "thumbnail",
        }
    }
}

impl fmt::Display for IfdGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single EXIF field: id, directory and typed value.
///
/// The data type and component count are derived from the value, so they
/// can never disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    id: u16,
    group: IfdGroup,
    value: TagValue,
}

impl Tag {
    /// Create a tag without consulting the definition table.
    ///
    /// Use [`TagStore::build`](crate::core::store::TagStore::build) for
    /// validated construction of standard tags.
    pub fn new(id: u16, group: IfdGroup, value: TagValue) -> Self {
        Self { id, group, value }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn group(&self) -> IfdGroup {
        self.group
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    pub fn into_value(self) -> TagValue {
        self.value
    }

    pub fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    pub fn component_count(&self) -> usize {
        self.value.component_count()
    }

    /// Registered name of the tag, if it is in the definition table
    pub fn name(&self) -> Option<&'static str> {
        crate::core::definitions::lookup(self.id, self.group).map(|def| def.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} = {}", name, self.value),
            None => write!(f, "{:#06x}/{} = {}", self.id, self.group, self.value),
        }
    }
}
