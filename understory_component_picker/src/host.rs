// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities consulted by the picker: hazard flags, clipboard, and editing.

use alloc::string::String;
use alloc::vec::Vec;

use understory_scene::{ClassQuery, ObjectId, ObjectQuery};

/// Host-signaled windows during which field memory must not be read.
pub trait HostState {
    /// `true` while the host is persisting data to storage.
    fn is_saving_package(&self) -> bool;

    /// `true` while the host is collecting garbage.
    fn is_garbage_collecting(&self) -> bool;

    /// `true` if reading field values is currently unsafe.
    fn is_read_hazard(&self) -> bool {
        self.is_saving_package() || self.is_garbage_collecting()
    }
}

/// Plain [`HostState`] flags for hosts that track the hazards themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostFlags {
    /// The host is saving.
    pub saving_package: bool,
    /// The host is collecting garbage.
    pub garbage_collecting: bool,
}

impl HostState for HostFlags {
    fn is_saving_package(&self) -> bool {
        self.saving_package
    }

    fn is_garbage_collecting(&self) -> bool {
        self.garbage_collecting
    }
}

/// Text clipboard access.
pub trait Clipboard {
    /// Returns the current clipboard text.
    fn text(&self) -> String;

    /// Replaces the clipboard text.
    fn set_text(&mut self, text: &str);
}

/// A process-local [`Clipboard`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    /// Creates a clipboard holding `text`.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self { text: text.into() }
    }
}

impl Clipboard for MemoryClipboard {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.into();
    }
}

/// Opens objects for editing in the host editor.
pub trait ObjectEditor {
    /// Brings up an editor for `object`.
    fn edit_object(&mut self, object: ObjectId);
}

/// An [`ObjectEditor`] that only records what it was asked to edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditLog {
    /// Objects passed to [`ObjectEditor::edit_object`], oldest first.
    pub edited: Vec<ObjectId>,
}

impl ObjectEditor for EditLog {
    fn edit_object(&mut self, object: ObjectId) {
        self.edited.push(object);
    }
}

/// The read-only host capabilities every picker operation consults.
#[derive(Copy, Clone)]
pub struct PickerContext<'a> {
    /// Class reflection.
    pub classes: &'a dyn ClassQuery,
    /// The object hierarchy.
    pub objects: &'a dyn ObjectQuery,
    /// Hazard flags.
    pub host: &'a dyn HostState,
}

impl<'a> PickerContext<'a> {
    /// Bundles the host capabilities.
    #[must_use]
    pub fn new(
        classes: &'a dyn ClassQuery,
        objects: &'a dyn ObjectQuery,
        host: &'a dyn HostState,
    ) -> Self {
        Self {
            classes,
            objects,
            host,
        }
    }
}

impl core::fmt::Debug for PickerContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PickerContext")
            .field("read_hazard", &self.host.is_read_hazard())
            .finish_non_exhaustive()
    }
}

/// The mutable host services menu commands act on.
pub struct PickerServices<'a> {
    /// Clipboard used by copy and paste.
    pub clipboard: &'a mut dyn Clipboard,
    /// Editor used by the edit command.
    pub editor: &'a mut dyn ObjectEditor,
}

impl core::fmt::Debug for PickerServices<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PickerServices").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_is_either_flag() {
        assert!(!HostFlags::default().is_read_hazard());
        let saving = HostFlags {
            saving_package: true,
            ..HostFlags::default()
        };
        let collecting = HostFlags {
            garbage_collecting: true,
            ..HostFlags::default()
        };
        assert!(saving.is_read_hazard());
        assert!(collecting.is_read_hazard());
    }

    #[test]
    fn memory_clipboard_round_trips_text() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.text(), "");
        clipboard.set_text("abc");
        assert_eq!(clipboard.text(), "abc");
    }
}
