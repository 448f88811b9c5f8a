//! In-memory tag directory
//!
//! [`TagStore`] holds the decoded (or freshly built) EXIF fields of one image,
//! keyed by `(tag id, IFD group)`.

use crate::core::byte_order::ByteOrder;
use crate::core::definitions::{self, ComponentCount, TagDefinition};
use crate::core::error::BuildError;
use crate::core::tag::{IfdGroup, Tag};
use crate::types::value::TagValue;

/// Directory of EXIF tags.
///
/// At most one tag exists per `(id, group)` key. Tags keep the order in which
/// they were first inserted; replacing a tag keeps its slot. Besides the tags
/// the store remembers the byte order to encode with and the compressed
/// thumbnail carried in IFD1, if any.
///
/// Equality is semantic: two stores are equal when they hold the same set of
/// tags, whatever their insertion order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagStore {
    tags: Vec<Tag>,
    byte_order: ByteOrder,
    thumbnail: Option<Vec<u8>>,
}

impl TagStore {
    /// Create an empty, big-endian store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            ..Self::default()
        }
    }

    fn position(&self, id: u16, group: IfdGroup) -> Option<usize> {
        self.tags
            .iter()
            .position(|tag| tag.id() == id && tag.group() == group)
    }

    /// Get a tag
    pub fn get(&self, id: u16, group: IfdGroup) -> Option<&Tag> {
        self.position(id, group).map(|index| &self.tags[index])
    }

    /// Get the value of a tag
    pub fn get_value(&self, id: u16, group: IfdGroup) -> Option<&TagValue> {
        self.get(id, group).map(Tag::value)
    }

    /// Get the first component of an integral tag.
    ///
    /// Returns `None` when the tag is absent or holds ASCII, rational or
    /// undefined data. `Some(0)` always means a stored zero.
    pub fn get_int_value(&self, id: u16, group: IfdGroup) -> Option<i64> {
        self.get_value(id, group).and_then(|value| value.as_i64(0))
    }

    /// Check if a tag exists
    pub fn contains(&self, id: u16, group: IfdGroup) -> bool {
        self.position(id, group).is_some()
    }

    /// Insert a tag, replacing any tag with the same key.
    ///
    /// Returns the replaced tag.
    pub fn set(&mut self, tag: Tag) -> Option<Tag> {
        match self.position(tag.id(), tag.group()) {
            Some(index) => Some(std::mem::replace(&mut self.tags[index], tag)),
            None => {
                self.tags.push(tag);
                None
            }
        }
    }

    /// Build a tag, validating the value against the definition table.
    ///
    /// The value must use one of the data types registered for the tag and
    /// carry the registered number of components. Values are never coerced:
    /// a `LONG` handed to a `SHORT` tag is a [`BuildError::TypeMismatch`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use exifkit::{IfdGroup, TagStore, tag};
    ///
    /// let mut store = TagStore::new();
    /// let orientation = TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 6u16).unwrap();
    /// store.set(orientation);
    /// assert_eq!(store.get_int_value(tag::ORIENTATION, IfdGroup::Primary), Some(6));
    ///
    /// assert!(TagStore::build(tag::ORIENTATION, IfdGroup::Primary, 6u32).is_err());
    /// ```
    pub fn build(
        id: u16,
        group: IfdGroup,
        value: impl Into<TagValue>,
    ) -> Result<Tag, BuildError> {
        let value = value.into();
        let definition =
            definitions::lookup(id, group).ok_or(BuildError::UnknownTag { id, group })?;
        validate(definition, &value)?;
        Ok(Tag::new(id, group, value))
    }

    /// Replace the value of an existing tag.
    ///
    /// Returns `Ok(false)` and leaves the store untouched when the tag is
    /// absent.
    pub fn set_value(
        &mut self,
        id: u16,
        group: IfdGroup,
        value: impl Into<TagValue>,
    ) -> Result<bool, BuildError> {
        let Some(index) = self.position(id, group) else {
            return Ok(false);
        };
        self.tags[index] = Self::build(id, group, value)?;
        Ok(true)
    }

    /// Remove a tag, returning it if it existed
    pub fn remove(&mut self, id: u16, group: IfdGroup) -> Option<Tag> {
        self.position(id, group).map(|index| self.tags.remove(index))
    }

    /// Snapshot of all tags in insertion order
    pub fn all_tags(&self) -> Vec<&Tag> {
        self.tags.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Tags of one IFD group, in insertion order
    pub fn tags_in(&self, group: IfdGroup) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(move |tag| tag.group() == group)
    }

    pub fn has_group(&self, group: IfdGroup) -> bool {
        self.tags_in(group).next().is_some()
    }

    /// Remove every tag of one IFD group
    pub fn clear_group(&mut self, group: IfdGroup) {
        self.tags.retain(|tag| tag.group() != group);
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Compressed thumbnail carried in IFD1
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    /// Replace the thumbnail; empty data removes it
    pub fn set_thumbnail(&mut self, jpeg: Vec<u8>) {
        self.thumbnail = (!jpeg.is_empty()).then_some(jpeg);
    }

    pub fn remove_thumbnail(&mut self) -> Option<Vec<u8>> {
        self.thumbnail.take()
    }

    /// Serialize the store as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::core::error::ExifResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::core::error::ExifError::Serialization(e.to_string()))
    }
}

impl PartialEq for TagStore {
    fn eq(&self, other: &Self) -> bool {
        self.byte_order == other.byte_order
            && self.thumbnail == other.thumbnail
            && self.tags.len() == other.tags.len()
            && self
                .tags
                .iter()
                .all(|tag| other.get(tag.id(), tag.group()) == Some(tag))
    }
}

impl Eq for TagStore {}

impl<'a> IntoIterator for &'a TagStore {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Check a value against its definition
fn validate(definition: &TagDefinition, value: &TagValue) -> Result<(), BuildError> {
    let data_type = value.data_type();
    let count = value.component_count();

    let mismatch = |expected: String, found: String| BuildError::TypeMismatch {
        id: definition.id,
        expected,
        found,
    };

    if !definition.data_types.contains(&data_type) {
        let expected = definition
            .data_types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(mismatch(expected, data_type.name().to_string()));
    }

    match definition.count {
        ComponentCount::Fixed(expected) if count != expected => {
            return Err(mismatch(
                format!("{}[{}]", data_type, expected),
                format!("{}[{}]", data_type, count),
            ));
        }
        ComponentCount::Variable if count == 0 => {
            return Err(mismatch(
                format!("at least one {} component", data_type),
                "no components".to_string(),
            ));
        }
        _ => {}
    }

    match value {
        TagValue::Ascii(s) if s.contains('\0') => Err(mismatch(
            "text without NUL".to_string(),
            "embedded NUL".to_string(),
        )),
        TagValue::Rational(v) if !v.iter().all(|r| r.fits_unsigned()) => Err(mismatch(
            "unsigned 32-bit components".to_string(),
            "out of range RATIONAL".to_string(),
        )),
        TagValue::SRational(v) if !v.iter().all(|r| r.fits_signed()) => Err(mismatch(
            "signed 32-bit components".to_string(),
            "out of range SRATIONAL".to_string(),
        )),
        _ => Ok(()),
    }
}
