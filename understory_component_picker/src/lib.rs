// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Component Picker: a property editor for fields that reference a scene component.
//!
//! A component picker field stores a weak [`ComponentReference`]. Its editor
//! lets the user choose a component from the scene, restricted by the field's
//! metadata:
//!
//! - By default only components owned by the actor that contains the field may be picked.
//! - `AllowAnyActor` widens that to any actor in the same level.
//! - `AllowedClasses` / `DisallowedClasses` filter by class or interface,
//!   separately for components and (with `AllowAnyActor`) for their owners.
//!
//! [`ComponentPickerCustomization`] is the controller. It reads the field
//! across every selected object, validates candidates, writes through the
//! host's string-based property API, and clears values that stop being valid
//! when the surrounding context changes. [`ComponentPickerMenu`] describes the
//! popup, and front ends drive it with [`PickerCommand`]s.
//!
//! Host services are reached through traits: [`PropertyHandle`] for the
//! field, [`HostState`] for hazard windows, [`Clipboard`] and [`ObjectEditor`]
//! for menu actions, and the object model traits of [`understory_scene`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_component_picker::{
//!     ComponentPickerCustomization, EditLog, HostFlags, MemoryClipboard, MemoryField,
//!     PickerCommand, PickerContext, PickerServices,
//! };
//! use understory_scene::{ClassQuery, ClassRegistry, World};
//!
//! let classes = ClassRegistry::new();
//! let mut world = World::new();
//! let level = world.add_level("Main");
//! let door = world.spawn_actor(level, classes.actor_class(), "Door").unwrap();
//! let hinge = world
//!     .add_component(door, classes.scene_component_class(), "Hinge")
//!     .unwrap();
//!
//! let host = HostFlags::default();
//! let cx = PickerContext::new(&classes, &world, &host);
//! let mut picker = ComponentPickerCustomization::new(MemoryField::new([door]), &cx);
//!
//! let mut clipboard = MemoryClipboard::default();
//! let mut editor = EditLog::default();
//! let mut services = PickerServices {
//!     clipboard: &mut clipboard,
//!     editor: &mut editor,
//! };
//!
//! picker.open_menu(&cx);
//! picker
//!     .dispatch(&cx, &mut services, PickerCommand::Select(hinge))
//!     .unwrap();
//! assert!(!picker.is_menu_open());
//! assert_eq!(picker.cached_component(), Some(hinge));
//! assert_eq!(picker.component_label(&cx), "Hinge");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod customization;
mod field;
mod filter;
mod host;
mod menu;
mod reference;

pub use config::{
    META_ALLOW_ANY_ACTOR, META_ALLOWED_CLASSES, META_DISALLOWED_CLASSES, PickerConfig,
    PickerConfigBuilder, PropertyFlags, parse_class_list,
};
pub use customization::{
    ComboContent, ComponentPickerCustomization, EditRestriction, PickerCandidates, PickerError,
    ValueStatus,
};
pub use field::{MemoryField, PropertyAccess, PropertyHandle, PropertyValue};
pub use filter::{ClassFilter, PickerFilters, is_filtered_object};
pub use host::{
    Clipboard, EditLog, HostFlags, HostState, MemoryClipboard, ObjectEditor, PickerContext,
    PickerServices,
};
pub use menu::{
    BrowseEntry, CandidateFilter, ClipboardParseError, ClipboardPayload, ComponentPickerMenu,
    MenuAction, MenuEntry, PickerCommand,
};
pub use reference::{ComponentReference, ImportError};
