// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property access: reading and writing the field across every edited object.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_scene::{ObjectId, ObjectQuery};

use crate::config::PropertyFlags;
use crate::reference::ComponentReference;

/// Outcome of a property access.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyAccess {
    /// The field could not be read or written.
    #[default]
    Fail,
    /// Every edited object agrees on one value.
    Success,
    /// The edited objects hold different values.
    MultipleValues,
}

/// The value read from a field, see [`ComponentPickerCustomization::get_value`].
///
/// [`ComponentPickerCustomization::get_value`]: crate::ComponentPickerCustomization::get_value
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// The field could not be read.
    Fail,
    /// Every edited object holding a value holds this one.
    Success(ComponentReference),
    /// The edited objects hold different values.
    MultipleValues,
}

impl PropertyValue {
    /// Returns the access outcome without the value.
    #[must_use]
    pub fn access(&self) -> PropertyAccess {
        match self {
            Self::Fail => PropertyAccess::Fail,
            Self::Success(_) => PropertyAccess::Success,
            Self::MultipleValues => PropertyAccess::MultipleValues,
        }
    }

    /// Returns the shared value on success.
    #[must_use]
    pub fn value(&self) -> Option<&ComponentReference> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// The host's handle to the field being customized.
///
/// One handle may stand for the same field on several selected objects at once.
pub trait PropertyHandle {
    /// Returns `false` once the handle no longer refers to a property.
    fn is_valid_handle(&self) -> bool;

    /// Returns one entry per edited object: the stored value, or `None` where
    /// that object has no storage for the field.
    fn raw_values(&self) -> SmallVec<[Option<ComponentReference>; 4]>;

    /// Returns the objects that contain the field, one per edited object.
    fn outer_objects(&self) -> SmallVec<[ObjectId; 4]>;

    /// Writes a value given in its exported text form to every edited object.
    fn set_value_from_formatted_string(
        &mut self,
        text: &str,
        objects: &dyn ObjectQuery,
    ) -> PropertyAccess;

    /// Returns the value of a metadata key declared on the property.
    fn metadata(&self, key: &str) -> Option<&str>;

    /// Returns `true` if the property declares the metadata key, with or without a value.
    fn has_metadata(&self, key: &str) -> bool {
        self.metadata(key).is_some()
    }

    /// Returns the property's declared flags.
    fn property_flags(&self) -> PropertyFlags;

    /// Returns `true` if the property cannot be edited right now.
    fn is_edit_const(&self) -> bool {
        self.property_flags().contains(PropertyFlags::EDIT_CONST)
    }
}

/// An in-memory [`PropertyHandle`].
///
/// Every successful write is recorded, which makes it convenient for tests
/// and for hosts that keep field values outside a reflection system.
///
/// # Example
///
/// ```rust
/// use understory_component_picker::{ComponentReference, MemoryField, PropertyHandle};
///
/// let field = MemoryField::new([]).with_values([Some(ComponentReference::empty()), None]);
/// assert_eq!(field.raw_values().len(), 2);
/// assert!(field.writes().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MemoryField {
    values: Vec<Option<ComponentReference>>,
    outers: SmallVec<[ObjectId; 4]>,
    metadata: HashMap<String, String>,
    flags: PropertyFlags,
    valid: bool,
    writes: Vec<String>,
}

impl MemoryField {
    /// Creates a field contained in `outers`, holding an empty value for each.
    #[must_use]
    pub fn new(outers: impl IntoIterator<Item = ObjectId>) -> Self {
        let outers: SmallVec<[ObjectId; 4]> = outers.into_iter().collect();
        Self {
            values: alloc::vec![Some(ComponentReference::empty()); outers.len()],
            outers,
            metadata: HashMap::new(),
            flags: PropertyFlags::empty(),
            valid: true,
            writes: Vec::new(),
        }
    }

    /// Replaces the stored values; `None` marks an object with no storage.
    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = Option<ComponentReference>>) -> Self {
        self.values = values.into_iter().collect();
        self
    }

    /// Stores the same value for every edited object.
    #[must_use]
    pub fn with_value(mut self, value: ComponentReference) -> Self {
        self.values.iter_mut().for_each(|v| *v = Some(value));
        self
    }

    /// Declares a metadata key.
    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Sets the property flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Overwrites the value stored for one edited object, as an external edit would.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_raw(&mut self, index: usize, value: Option<ComponentReference>) {
        self.values[index] = value;
    }

    /// Replaces the containing objects without touching the stored values.
    pub fn set_outers(&mut self, outers: impl IntoIterator<Item = ObjectId>) {
        self.outers = outers.into_iter().collect();
    }

    /// Marks the handle as no longer referring to a property.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Returns the formatted strings successfully written so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl PropertyHandle for MemoryField {
    fn is_valid_handle(&self) -> bool {
        self.valid
    }

    fn raw_values(&self) -> SmallVec<[Option<ComponentReference>; 4]> {
        self.values.iter().copied().collect()
    }

    fn outer_objects(&self) -> SmallVec<[ObjectId; 4]> {
        self.outers.clone()
    }

    fn set_value_from_formatted_string(
        &mut self,
        text: &str,
        objects: &dyn ObjectQuery,
    ) -> PropertyAccess {
        if !self.valid {
            return PropertyAccess::Fail;
        }
        let Ok(value) = ComponentReference::import_text(text, objects) else {
            return PropertyAccess::Fail;
        };
        for slot in self.values.iter_mut().flatten() {
            *slot = value;
        }
        self.writes.push(text.into());
        PropertyAccess::Success
    }

    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    fn property_flags(&self) -> PropertyFlags {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_scene::World;

    #[test]
    fn formatted_write_updates_every_storage_location() {
        let world = World::new();
        let mut field = MemoryField::new([]).with_values([
            Some(ComponentReference::empty()),
            None,
            Some(ComponentReference::empty()),
        ]);
        let result =
            field.set_value_from_formatted_string("(PickedComponent=None)", &world);

        assert_eq!(result, PropertyAccess::Success);
        assert_eq!(field.writes(), ["(PickedComponent=None)"]);
        assert_eq!(field.raw_values()[1], None);
    }

    #[test]
    fn malformed_or_invalid_writes_fail() {
        let world = World::new();
        let mut field = MemoryField::new([]);
        assert_eq!(
            field.set_value_from_formatted_string("garbage", &world),
            PropertyAccess::Fail
        );
        field.invalidate();
        assert_eq!(
            field.set_value_from_formatted_string("(PickedComponent=None)", &world),
            PropertyAccess::Fail
        );
        assert!(field.writes().is_empty());
    }

    #[test]
    fn edit_const_follows_flags() {
        let field = MemoryField::new([]).with_flags(PropertyFlags::EDIT_CONST);
        assert!(field.is_edit_const());
        assert!(!MemoryField::new([]).is_edit_const());
    }

    #[test]
    fn property_value_access() {
        let value = PropertyValue::Success(ComponentReference::empty());
        assert_eq!(value.access(), PropertyAccess::Success);
        assert_eq!(value.value(), Some(&ComponentReference::empty()));
        assert_eq!(PropertyValue::MultipleValues.value(), None);
    }
}
