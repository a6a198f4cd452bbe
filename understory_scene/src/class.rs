// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class and interface reflection.
//!
//! [`ClassQuery`] is the narrow capability the picker needs from a host
//! reflection system: name lookup, subclass and interface queries, and
//! enumeration of the classes implementing an interface. [`ClassRegistry`] is
//! an in-memory implementation for hosts without one (and for tests).

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::id::ClassId;

bitflags::bitflags! {
    /// Flags describing a class.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u8 {
        /// The class is an interface: it is implemented rather than derived from.
        const INTERFACE = 0b0000_0001;
        /// The class cannot be instantiated directly.
        const ABSTRACT  = 0b0000_0010;
    }
}

/// Read access to a reflection system.
pub trait ClassQuery {
    /// Resolves a class from any of its names, if it is already known.
    fn find_class(&self, name: &str) -> Option<ClassId>;

    /// Resolves a class by path, loading it if the host supports that.
    ///
    /// The default only consults classes that are already known.
    fn load_class(&self, path: &str) -> Option<ClassId> {
        self.find_class(path)
    }

    /// Returns the class's name.
    fn class_name(&self, class: ClassId) -> Option<&str>;

    /// Returns the class's flags (empty for unknown classes).
    fn class_flags(&self, class: ClassId) -> ClassFlags;

    /// Returns the direct parent class, if any.
    fn parent_class(&self, class: ClassId) -> Option<ClassId>;

    /// Returns `true` if `class` is `base` or derives from it.
    fn is_subclass_of(&self, class: ClassId, base: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(c) = current {
            if c == base {
                return true;
            }
            current = self.parent_class(c);
        }
        false
    }

    /// Returns `true` if `class`, or one of its ancestors, implements `interface`.
    fn implements_interface(&self, class: ClassId, interface: ClassId) -> bool;

    /// Returns every known non-interface class implementing `interface`.
    fn implementors(&self, interface: ClassId) -> Vec<ClassId>;

    /// The root object class.
    fn object_class(&self) -> ClassId;

    /// The base class of every placeable actor.
    fn actor_class(&self) -> ClassId;

    /// The base class of every actor component.
    fn component_class(&self) -> ClassId;

    /// The class of level-script actors, which are templates that may still be edited.
    fn level_script_actor_class(&self) -> ClassId;
}

/// Errors produced while registering classes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A class with this name is already registered.
    #[error("class `{0}` is already registered")]
    DuplicateName(String),
    /// The class id does not belong to this registry.
    #[error("unknown class {0:?}")]
    UnknownClass(ClassId),
    /// Only interfaces can be implemented.
    #[error("class `{0}` is not an interface")]
    NotAnInterface(String),
}

#[derive(Clone, Debug)]
struct ClassEntry {
    name: String,
    parent: Option<ClassId>,
    flags: ClassFlags,
    interfaces: SmallVec<[ClassId; 2]>,
}

/// An in-memory class table.
///
/// A new registry already contains the engine base classes:
///
/// | Class | Parent |
/// |-------|--------|
/// | `Object` | none |
/// | `Actor` | `Object` |
/// | `LevelScriptActor` | `Actor` |
/// | `ActorComponent` | `Object` |
/// | `SceneComponent` | `ActorComponent` |
///
/// # Example
///
/// ```rust
/// use understory_scene::{ClassQuery, ClassRegistry};
///
/// let mut classes = ClassRegistry::new();
/// let damageable = classes.register_interface("Damageable", None).unwrap();
/// let health = classes
///     .register_class("HealthComponent", classes.component_class())
///     .unwrap();
/// classes.implement(health, damageable).unwrap();
///
/// assert!(classes.is_subclass_of(health, classes.component_class()));
/// assert!(classes.implements_interface(health, damageable));
/// assert_eq!(classes.implementors(damageable), vec![health]);
/// ```
#[derive(Clone, Debug)]
pub struct ClassRegistry {
    classes: Vec<ClassEntry>,
    by_name: HashMap<String, ClassId>,
    object: ClassId,
    actor: ClassId,
    level_script_actor: ClassId,
    component: ClassId,
    scene_component: ClassId,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates a registry holding only the base classes.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            classes: Vec::new(),
            by_name: HashMap::new(),
            object: ClassId::new(0),
            actor: ClassId::new(0),
            level_script_actor: ClassId::new(0),
            component: ClassId::new(0),
            scene_component: ClassId::new(0),
        };
        registry.object = registry.push("Object", None, ClassFlags::empty());
        registry.actor = registry.push("Actor", Some(registry.object), ClassFlags::empty());
        registry.level_script_actor =
            registry.push("LevelScriptActor", Some(registry.actor), ClassFlags::empty());
        registry.component =
            registry.push("ActorComponent", Some(registry.object), ClassFlags::ABSTRACT);
        registry.scene_component =
            registry.push("SceneComponent", Some(registry.component), ClassFlags::empty());
        registry
    }

    /// The built-in `SceneComponent` class.
    #[must_use]
    pub fn scene_component_class(&self) -> ClassId {
        self.scene_component
    }

    /// Registers a concrete class deriving from `parent`.
    pub fn register_class(&mut self, name: &str, parent: ClassId) -> Result<ClassId, RegistryError> {
        self.register_with_flags(name, Some(parent), ClassFlags::empty())
    }

    /// Registers an interface, optionally extending another interface.
    pub fn register_interface(
        &mut self,
        name: &str,
        parent: Option<ClassId>,
    ) -> Result<ClassId, RegistryError> {
        if let Some(parent) = parent {
            self.require_interface(parent)?;
        }
        self.register_with_flags(name, parent, ClassFlags::INTERFACE)
    }

    /// Registers a class with explicit flags.
    pub fn register_with_flags(
        &mut self,
        name: &str,
        parent: Option<ClassId>,
        flags: ClassFlags,
    ) -> Result<ClassId, RegistryError> {
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.into()));
        }
        if let Some(parent) = parent {
            self.entry(parent)?;
        }
        Ok(self.push(name, parent, flags))
    }

    /// Declares that `class` implements `interface`.
    ///
    /// Implementing the same interface twice is a no-op.
    pub fn implement(&mut self, class: ClassId, interface: ClassId) -> Result<(), RegistryError> {
        self.require_interface(interface)?;
        let entry = self
            .classes
            .get_mut(class.idx())
            .ok_or(RegistryError::UnknownClass(class))?;
        if !entry.interfaces.contains(&interface) {
            entry.interfaces.push(interface);
        }
        Ok(())
    }

    fn push(&mut self, name: &str, parent: Option<ClassId>, flags: ClassFlags) -> ClassId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "class tables never approach u32::MAX entries"
        )]
        let id = ClassId::new(self.classes.len() as u32);
        self.classes.push(ClassEntry {
            name: name.into(),
            parent,
            flags,
            interfaces: SmallVec::new(),
        });
        self.by_name.insert(name.into(), id);
        id
    }

    fn entry(&self, class: ClassId) -> Result<&ClassEntry, RegistryError> {
        self.classes
            .get(class.idx())
            .ok_or(RegistryError::UnknownClass(class))
    }

    fn require_interface(&self, class: ClassId) -> Result<(), RegistryError> {
        let entry = self.entry(class)?;
        if entry.flags.contains(ClassFlags::INTERFACE) {
            Ok(())
        } else {
            Err(RegistryError::NotAnInterface(entry.name.clone()))
        }
    }
}

impl ClassQuery for ClassRegistry {
    fn find_class(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    fn class_name(&self, class: ClassId) -> Option<&str> {
        self.classes.get(class.idx()).map(|e| e.name.as_str())
    }

    fn class_flags(&self, class: ClassId) -> ClassFlags {
        self.classes
            .get(class.idx())
            .map_or(ClassFlags::empty(), |e| e.flags)
    }

    fn parent_class(&self, class: ClassId) -> Option<ClassId> {
        self.classes.get(class.idx()).and_then(|e| e.parent)
    }

    fn implements_interface(&self, class: ClassId, interface: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(c) = current {
            let Some(entry) = self.classes.get(c.idx()) else {
                return false;
            };
            if entry
                .interfaces
                .iter()
                .any(|&implemented| self.is_subclass_of(implemented, interface))
            {
                return true;
            }
            current = entry.parent;
        }
        false
    }

    fn implementors(&self, interface: ClassId) -> Vec<ClassId> {
        let mut out = Vec::new();
        for (i, entry) in self.classes.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "bounded by push")]
            let class = ClassId::new(i as u32);
            if !entry.flags.contains(ClassFlags::INTERFACE)
                && self.implements_interface(class, interface)
            {
                out.push(class);
            }
        }
        out
    }

    fn object_class(&self) -> ClassId {
        self.object
    }

    fn actor_class(&self) -> ClassId {
        self.actor
    }

    fn component_class(&self) -> ClassId {
        self.component
    }

    fn level_script_actor_class(&self) -> ClassId {
        self.level_script_actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_classes_form_expected_hierarchy() {
        let classes = ClassRegistry::new();
        assert!(classes.is_subclass_of(classes.actor_class(), classes.object_class()));
        assert!(classes.is_subclass_of(classes.level_script_actor_class(), classes.actor_class()));
        assert!(classes.is_subclass_of(classes.scene_component_class(), classes.component_class()));
        assert!(!classes.is_subclass_of(classes.component_class(), classes.actor_class()));
        assert_eq!(classes.find_class("Actor"), Some(classes.actor_class()));
        assert_eq!(classes.class_name(classes.component_class()), Some("ActorComponent"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut classes = ClassRegistry::new();
        let err = classes
            .register_class("Actor", classes.object_class())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("Actor".into()));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut classes = ClassRegistry::new();
        let err = classes.register_class("Orphan", ClassId::new(999)).unwrap_err();
        assert_eq!(err, RegistryError::UnknownClass(ClassId::new(999)));
    }

    #[test]
    fn only_interfaces_can_be_implemented() {
        let mut classes = ClassRegistry::new();
        let actor = classes.actor_class();
        let err = classes.implement(actor, classes.component_class()).unwrap_err();
        assert_eq!(err, RegistryError::NotAnInterface("ActorComponent".into()));
    }

    #[test]
    fn interfaces_are_inherited_by_subclasses() {
        let mut classes = ClassRegistry::new();
        let usable = classes.register_interface("Usable", None).unwrap();
        let base = classes.register_class("Lever", classes.actor_class()).unwrap();
        let derived = classes.register_class("RustyLever", base).unwrap();
        classes.implement(base, usable).unwrap();

        assert!(classes.implements_interface(derived, usable));
        assert_eq!(classes.implementors(usable), alloc::vec![base, derived]);
    }

    #[test]
    fn interface_extension_counts_as_implementation() {
        let mut classes = ClassRegistry::new();
        let base_iface = classes.register_interface("Interactable", None).unwrap();
        let sub_iface = classes.register_interface("Pickup", Some(base_iface)).unwrap();
        let coin = classes.register_class("Coin", classes.actor_class()).unwrap();
        classes.implement(coin, sub_iface).unwrap();

        assert!(classes.implements_interface(coin, base_iface));
        assert!(!classes.implementors(base_iface).contains(&sub_iface));
    }

    #[test]
    fn interface_cannot_extend_a_concrete_class() {
        let mut classes = ClassRegistry::new();
        let err = classes
            .register_interface("Weird", Some(classes.actor_class()))
            .unwrap_err();
        assert_eq!(err, RegistryError::NotAnInterface("Actor".into()));
    }
}
