// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The object hierarchy: actors, components, and their containing objects.
//!
//! [`ObjectQuery`] is what the picker reads; [`World`] is a reference host
//! built on generational slots.

use alloc::string::String;
use alloc::vec::Vec;

use crate::class::ClassQuery;
use crate::id::{ClassId, LevelId, ObjectId};

/// The member variable of an owner class that exposes a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentVariable {
    /// Variable name.
    pub name: String,
    /// `true` when the variable is an array holding several components.
    pub is_array: bool,
}

/// Read access to a host's object hierarchy.
///
/// Every lookup tolerates stale handles: a destroyed object yields `None`
/// (or `false`) instead of failing.
pub trait ObjectQuery {
    /// Returns `true` if `object` still refers to a live object.
    fn is_alive(&self, object: ObjectId) -> bool;

    /// Returns the object's class.
    fn class_of(&self, object: ObjectId) -> Option<ClassId>;

    /// Returns the containing object in the ownership hierarchy.
    fn outer(&self, object: ObjectId) -> Option<ObjectId>;

    /// Returns the actor owning a component.
    fn owner(&self, component: ObjectId) -> Option<ObjectId>;

    /// Returns the level of an actor, or of a component's owner.
    fn level(&self, object: ObjectId) -> Option<LevelId>;

    /// Returns the object's name.
    fn name(&self, object: ObjectId) -> Option<&str>;

    /// Returns the user-facing label of an actor, falling back to its name.
    fn label(&self, object: ObjectId) -> Option<&str> {
        self.name(object)
    }

    /// Returns the full path that uniquely identifies the object.
    fn path_name(&self, object: ObjectId) -> Option<String>;

    /// Finds a live object by its [path](ObjectQuery::path_name).
    fn find_object(&self, path: &str) -> Option<ObjectId>;

    /// Returns `true` for template objects (class default objects and archetypes).
    fn is_template(&self, object: ObjectId) -> bool;

    /// The host's policy for whether a component instance may be edited.
    fn can_edit_component(&self, component: ObjectId) -> bool;

    /// Returns the owner's member variable exposing this component, if any.
    fn component_variable(&self, component: ObjectId) -> Option<&ComponentVariable>;
}

/// Helpers built on [`ObjectQuery`] and [`ClassQuery`].
pub trait ObjectQueryExt: ObjectQuery {
    /// Returns `true` if the object is live and its class is `class` or derives from it.
    fn is_a(&self, classes: &dyn ClassQuery, object: ObjectId, class: ClassId) -> bool {
        self.class_of(object)
            .is_some_and(|c| classes.is_subclass_of(c, class))
    }

    /// Returns `true` if the object is an actor.
    fn is_actor(&self, classes: &dyn ClassQuery, object: ObjectId) -> bool {
        self.is_a(classes, object, classes.actor_class())
    }

    /// Returns `true` if the object is an actor component.
    fn is_component(&self, classes: &dyn ClassQuery, object: ObjectId) -> bool {
        self.is_a(classes, object, classes.component_class())
    }

    /// Resolves an object to an actor directly, or through the component's owner.
    ///
    /// Unlike [`first_actor_in_outer_chain`](Self::first_actor_in_outer_chain)
    /// this does not look at containing objects.
    fn as_actor(&self, classes: &dyn ClassQuery, object: ObjectId) -> Option<ObjectId> {
        if self.is_actor(classes, object) {
            Some(object)
        } else if self.is_component(classes, object) {
            self.owner(object)
        } else {
            None
        }
    }

    /// Walks outward from `object` through its containing objects and returns
    /// the first one that is an actor, or the owner of the first component
    /// that has one.
    fn first_actor_in_outer_chain(
        &self,
        classes: &dyn ClassQuery,
        object: ObjectId,
    ) -> Option<ObjectId> {
        let mut current = Some(object).filter(|&o| self.is_alive(o));
        while let Some(o) = current {
            if self.is_actor(classes, o) {
                return Some(o);
            }
            if self.is_component(classes, o) {
                if let Some(owner) = self.owner(o) {
                    return Some(owner);
                }
            }
            current = self.outer(o);
        }
        None
    }
}

impl<T: ObjectQuery + ?Sized> ObjectQueryExt for T {}

/// Errors produced by [`World`] mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The handle no longer refers to a live object.
    #[error("object {0} is not alive")]
    DeadObject(ObjectId),
    /// The level does not exist.
    #[error("unknown level {0:?}")]
    UnknownLevel(LevelId),
    /// Another object with this name shares the same outer.
    #[error("an object named `{name}` already exists in that scope")]
    NameTaken {
        /// The conflicting name.
        name: String,
    },
    /// The object is not an actor.
    #[error("object {0} is not an actor")]
    NotAnActor(ObjectId),
    /// The object is not a component.
    #[error("object {0} is not a component")]
    NotAComponent(ObjectId),
    /// Re-parenting would make an object contain itself.
    #[error("object {0} cannot be placed inside itself")]
    OuterCycle(ObjectId),
    /// The name is empty or contains a path separator (`.`) or quote (`"`).
    #[error("`{name}` is not a valid object name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ObjectKind {
    Actor,
    Component,
    Object,
}

#[derive(Clone, Debug)]
struct ObjectData {
    name: String,
    class: ClassId,
    kind: ObjectKind,
    outer: Option<ObjectId>,
    owner: Option<ObjectId>,
    level: Option<LevelId>,
    label: Option<String>,
    template: bool,
    editable: bool,
    variable: Option<ComponentVariable>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<ObjectData>,
}

/// An in-memory object hierarchy.
///
/// Actors live in levels; components are owned by (and contained in) an actor;
/// plain objects hang off any containing object. Destroying an object
/// invalidates its handle and everything it contains or owns.
///
/// # Example
///
/// ```rust
/// use understory_scene::{ClassQuery, ClassRegistry, ObjectQuery, World};
///
/// let classes = ClassRegistry::new();
/// let mut world = World::new();
/// let level = world.add_level("Persistent");
/// let door = world.spawn_actor(level, classes.actor_class(), "Door").unwrap();
/// let hinge = world
///     .add_component(door, classes.scene_component_class(), "Hinge")
///     .unwrap();
///
/// assert_eq!(world.owner(hinge), Some(door));
/// assert_eq!(world.path_name(hinge).as_deref(), Some("Persistent.Door.Hinge"));
///
/// world.destroy(door).unwrap();
/// assert!(!world.is_alive(hinge));
/// ```
#[derive(Clone, Debug, Default)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    levels: Vec<String>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a level and returns its id.
    pub fn add_level(&mut self, name: &str) -> LevelId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "level tables never approach u32::MAX entries"
        )]
        let id = LevelId::new(self.levels.len() as u32);
        self.levels.push(name.into());
        id
    }

    /// Returns the level's name.
    #[must_use]
    pub fn level_name(&self, level: LevelId) -> Option<&str> {
        self.levels.get(level.index() as usize).map(String::as_str)
    }

    /// Spawns an actor of `class` in `level`.
    pub fn spawn_actor(
        &mut self,
        level: LevelId,
        class: ClassId,
        name: &str,
    ) -> Result<ObjectId, WorldError> {
        self.require_level(level)?;
        self.require_unique(None, Some(level), name)?;
        Ok(self.alloc(ObjectData {
            level: Some(level),
            ..ObjectData::new(name, class, ObjectKind::Actor)
        }))
    }

    /// Adds a component of `class` to `actor`. The actor becomes both its owner and its outer.
    pub fn add_component(
        &mut self,
        actor: ObjectId,
        class: ClassId,
        name: &str,
    ) -> Result<ObjectId, WorldError> {
        self.require_kind(actor, ObjectKind::Actor)?;
        self.require_unique(Some(actor), None, name)?;
        Ok(self.alloc(ObjectData {
            outer: Some(actor),
            owner: Some(actor),
            ..ObjectData::new(name, class, ObjectKind::Component)
        }))
    }

    /// Adds a component with no owner, contained in `outer` (or at the root).
    ///
    /// Hosts produce these for components that are being constructed or were
    /// detached from their actor.
    pub fn add_unowned_component(
        &mut self,
        outer: Option<ObjectId>,
        class: ClassId,
        name: &str,
    ) -> Result<ObjectId, WorldError> {
        if let Some(outer) = outer {
            self.data(outer)?;
        }
        self.require_unique(outer, None, name)?;
        Ok(self.alloc(ObjectData {
            outer,
            ..ObjectData::new(name, class, ObjectKind::Component)
        }))
    }

    /// Adds a plain object contained in `outer`, or a root object when `outer` is `None`.
    pub fn add_object(
        &mut self,
        outer: Option<ObjectId>,
        class: ClassId,
        name: &str,
    ) -> Result<ObjectId, WorldError> {
        if let Some(outer) = outer {
            self.data(outer)?;
        }
        self.require_unique(outer, None, name)?;
        Ok(self.alloc(ObjectData {
            outer,
            ..ObjectData::new(name, class, ObjectKind::Object)
        }))
    }

    /// Destroys an object, everything contained in it, and every component it owns.
    pub fn destroy(&mut self, object: ObjectId) -> Result<(), WorldError> {
        self.data(object)?;
        let mut pending = alloc::vec![object];
        while let Some(doomed) = pending.pop() {
            if !self.is_alive(doomed) {
                continue;
            }
            for (index, slot) in self.slots.iter().enumerate() {
                if let Some(data) = &slot.data {
                    if data.outer == Some(doomed) || data.owner == Some(doomed) {
                        #[expect(clippy::cast_possible_truncation, reason = "bounded by alloc")]
                        let index = index as u32;
                        pending.push(ObjectId::from_raw(index, slot.generation));
                    }
                }
            }
            let slot = &mut self.slots[doomed.idx()];
            slot.data = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(doomed.index());
            tracing::trace!(object = %doomed, "destroyed object");
        }
        Ok(())
    }

    /// Re-parents an object under a new containing object.
    pub fn set_outer(
        &mut self,
        object: ObjectId,
        outer: Option<ObjectId>,
    ) -> Result<(), WorldError> {
        let name = self.data(object)?.name.clone();
        if let Some(outer) = outer {
            self.data(outer)?;
            let mut chain = Some(outer);
            while let Some(o) = chain {
                if o == object {
                    return Err(WorldError::OuterCycle(object));
                }
                chain = self.outer(o);
            }
        }
        let level = self.data(object)?.level;
        if self.find_sibling(outer, level, &name, Some(object)).is_some() {
            return Err(WorldError::NameTaken { name });
        }
        self.data_mut(object)?.outer = outer;
        Ok(())
    }

    /// Changes (or clears) the owning actor of a component.
    pub fn set_owner(
        &mut self,
        component: ObjectId,
        owner: Option<ObjectId>,
    ) -> Result<(), WorldError> {
        self.require_kind(component, ObjectKind::Component)?;
        if let Some(owner) = owner {
            self.require_kind(owner, ObjectKind::Actor)?;
        }
        self.data_mut(component)?.owner = owner;
        Ok(())
    }

    /// Moves an actor to another level.
    pub fn move_actor(&mut self, actor: ObjectId, level: LevelId) -> Result<(), WorldError> {
        self.require_kind(actor, ObjectKind::Actor)?;
        self.require_level(level)?;
        let name = self.data(actor)?.name.clone();
        if self.find_sibling(None, Some(level), &name, Some(actor)).is_some() {
            return Err(WorldError::NameTaken { name });
        }
        self.data_mut(actor)?.level = Some(level);
        Ok(())
    }

    /// Marks an object as a template (class default object or archetype).
    pub fn set_template(&mut self, object: ObjectId, template: bool) -> Result<(), WorldError> {
        self.data_mut(object)?.template = template;
        Ok(())
    }

    /// Sets the user-facing label of an actor.
    pub fn set_label(&mut self, actor: ObjectId, label: &str) -> Result<(), WorldError> {
        self.require_kind(actor, ObjectKind::Actor)?;
        self.data_mut(actor)?.label = Some(label.into());
        Ok(())
    }

    /// Sets whether the editor may edit this component instance.
    pub fn set_component_editable(
        &mut self,
        component: ObjectId,
        editable: bool,
    ) -> Result<(), WorldError> {
        self.require_kind(component, ObjectKind::Component)?;
        self.data_mut(component)?.editable = editable;
        Ok(())
    }

    /// Records the owner class's member variable that exposes this component.
    pub fn set_component_variable(
        &mut self,
        component: ObjectId,
        variable: Option<ComponentVariable>,
    ) -> Result<(), WorldError> {
        self.require_kind(component, ObjectKind::Component)?;
        self.data_mut(component)?.variable = variable;
        Ok(())
    }

    /// Iterates over all live objects in slot order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            #[expect(clippy::cast_possible_truncation, reason = "bounded by alloc")]
            let index = index as u32;
            slot.data
                .as_ref()
                .map(|_| ObjectId::from_raw(index, slot.generation))
        })
    }

    /// Iterates over the live actors of `level` in slot order.
    pub fn actors_in(&self, level: LevelId) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects().filter(move |&o| {
            self.data(o)
                .is_ok_and(|d| d.kind == ObjectKind::Actor && d.level == Some(level))
        })
    }

    /// Iterates over the live components owned by `actor` in slot order.
    pub fn components_of(&self, actor: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects().filter(move |&o| {
            self.data(o)
                .is_ok_and(|d| d.kind == ObjectKind::Component && d.owner == Some(actor))
        })
    }

    /// Iterates over all levels.
    pub fn levels(&self) -> impl Iterator<Item = LevelId> + '_ {
        (0..self.levels.len()).map(|i| {
            #[expect(clippy::cast_possible_truncation, reason = "bounded by add_level")]
            let i = i as u32;
            LevelId::new(i)
        })
    }

    fn alloc(&mut self, data: ObjectData) -> ObjectId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            ObjectId::from_raw(index, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "object tables never approach u32::MAX entries"
            )]
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                data: Some(data),
            });
            ObjectId::from_raw(index, 1)
        }
    }

    fn data(&self, object: ObjectId) -> Result<&ObjectData, WorldError> {
        self.slots
            .get(object.idx())
            .filter(|slot| slot.generation == object.generation())
            .and_then(|slot| slot.data.as_ref())
            .ok_or(WorldError::DeadObject(object))
    }

    fn data_mut(&mut self, object: ObjectId) -> Result<&mut ObjectData, WorldError> {
        self.slots
            .get_mut(object.idx())
            .filter(|slot| slot.generation == object.generation())
            .and_then(|slot| slot.data.as_mut())
            .ok_or(WorldError::DeadObject(object))
    }

    fn require_kind(&self, object: ObjectId, kind: ObjectKind) -> Result<(), WorldError> {
        let data = self.data(object)?;
        match (kind, data.kind) {
            (ObjectKind::Actor, ObjectKind::Actor)
            | (ObjectKind::Component, ObjectKind::Component)
            | (ObjectKind::Object, _) => Ok(()),
            (ObjectKind::Actor, _) => Err(WorldError::NotAnActor(object)),
            (ObjectKind::Component, _) => Err(WorldError::NotAComponent(object)),
        }
    }

    fn require_level(&self, level: LevelId) -> Result<(), WorldError> {
        if (level.index() as usize) < self.levels.len() {
            Ok(())
        } else {
            Err(WorldError::UnknownLevel(level))
        }
    }

    fn require_unique(
        &self,
        outer: Option<ObjectId>,
        level: Option<LevelId>,
        name: &str,
    ) -> Result<(), WorldError> {
        // Names are path segments and appear inside quoted export text.
        if name.is_empty() || name.contains(['.', '"']) {
            return Err(WorldError::InvalidName { name: name.into() });
        }
        match self.find_sibling(outer, level, name, None) {
            Some(_) => Err(WorldError::NameTaken { name: name.into() }),
            None => Ok(()),
        }
    }

    // Root objects are scoped by level; everything else by its outer.
    fn find_sibling(
        &self,
        outer: Option<ObjectId>,
        level: Option<LevelId>,
        name: &str,
        except: Option<ObjectId>,
    ) -> Option<ObjectId> {
        self.objects().find(|&o| {
            Some(o) != except
                && self.data(o).is_ok_and(|d| {
                    d.outer == outer && d.name == name && (outer.is_some() || d.level == level)
                })
        })
    }
}

impl ObjectData {
    fn new(name: &str, class: ClassId, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            class,
            kind,
            outer: None,
            owner: None,
            level: None,
            label: None,
            template: false,
            editable: true,
            variable: None,
        }
    }
}

impl ObjectQuery for World {
    fn is_alive(&self, object: ObjectId) -> bool {
        self.data(object).is_ok()
    }

    fn class_of(&self, object: ObjectId) -> Option<ClassId> {
        self.data(object).ok().map(|d| d.class)
    }

    fn outer(&self, object: ObjectId) -> Option<ObjectId> {
        self.data(object)
            .ok()
            .and_then(|d| d.outer)
            .filter(|&o| self.is_alive(o))
    }

    fn owner(&self, component: ObjectId) -> Option<ObjectId> {
        self.data(component)
            .ok()
            .and_then(|d| d.owner)
            .filter(|&o| self.is_alive(o))
    }

    fn level(&self, object: ObjectId) -> Option<LevelId> {
        let data = self.data(object).ok()?;
        match data.kind {
            ObjectKind::Actor => data.level,
            ObjectKind::Component => self.owner(object).and_then(|o| self.level(o)),
            ObjectKind::Object => None,
        }
    }

    fn name(&self, object: ObjectId) -> Option<&str> {
        self.data(object).ok().map(|d| d.name.as_str())
    }

    fn label(&self, object: ObjectId) -> Option<&str> {
        let data = self.data(object).ok()?;
        Some(data.label.as_deref().unwrap_or(&data.name))
    }

    fn path_name(&self, object: ObjectId) -> Option<String> {
        let mut segments: Vec<&str> = Vec::new();
        let mut root = object;
        let mut current = Some(object);
        while let Some(o) = current {
            let data = self.data(o).ok()?;
            segments.push(&data.name);
            root = o;
            current = data.outer;
        }
        let mut path = String::new();
        if let Some(level) = self.data(root).ok().and_then(|d| d.level) {
            path.push_str(self.level_name(level)?);
            path.push('.');
        }
        for (i, segment) in segments.iter().rev().enumerate() {
            if i > 0 {
                path.push('.');
            }
            path.push_str(segment);
        }
        Some(path)
    }

    fn find_object(&self, path: &str) -> Option<ObjectId> {
        self.objects()
            .find(|&o| self.path_name(o).is_some_and(|p| p == path))
    }

    fn is_template(&self, object: ObjectId) -> bool {
        self.data(object).is_ok_and(|d| d.template)
    }

    fn can_edit_component(&self, component: ObjectId) -> bool {
        self.data(component)
            .is_ok_and(|d| d.kind == ObjectKind::Component && d.editable)
    }

    fn component_variable(&self, component: ObjectId) -> Option<&ComponentVariable> {
        self.data(component).ok().and_then(|d| d.variable.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassRegistry;

    fn setup() -> (ClassRegistry, World, LevelId) {
        let classes = ClassRegistry::new();
        let mut world = World::new();
        let level = world.add_level("Main");
        (classes, world, level)
    }

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let (classes, mut world, level) = setup();
        let a = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        world.destroy(a).unwrap();
        let b = world.spawn_actor(level, classes.actor_class(), "B").unwrap();

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(!world.is_alive(a));
        assert_eq!(world.name(a), None);
        assert_eq!(world.name(b), Some("B"));
    }

    #[test]
    fn destroying_an_actor_destroys_its_components_and_contents() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        let inner = world
            .add_object(Some(comp), classes.object_class(), "Settings")
            .unwrap();

        world.destroy(actor).unwrap();
        assert!(!world.is_alive(comp));
        assert!(!world.is_alive(inner));
        assert_eq!(world.objects().count(), 0);
    }

    #[test]
    fn sibling_names_must_be_unique() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        let err = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap_err();
        assert_eq!(err, WorldError::NameTaken { name: "C".into() });

        // Same actor name in a different level is fine.
        let other = world.add_level("Other");
        assert!(world.spawn_actor(other, classes.actor_class(), "A").is_ok());
    }

    #[test]
    fn component_level_follows_owner() {
        let (classes, mut world, level) = setup();
        let other = world.add_level("Other");
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        assert_eq!(world.level(comp), Some(level));

        world.move_actor(actor, other).unwrap();
        assert_eq!(world.level(comp), Some(other));
        assert_eq!(world.path_name(comp).as_deref(), Some("Other.A.C"));
    }

    #[test]
    fn set_outer_rejects_cycles() {
        let (classes, mut world, _) = setup();
        let a = world.add_object(None, classes.object_class(), "A").unwrap();
        let b = world.add_object(Some(a), classes.object_class(), "B").unwrap();
        assert_eq!(world.set_outer(a, Some(b)), Err(WorldError::OuterCycle(a)));
    }

    #[test]
    fn find_object_resolves_paths() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        assert_eq!(world.find_object("Main.A.C"), Some(comp));
        assert_eq!(world.find_object("Main.A"), Some(actor));
        assert_eq!(world.find_object("Main.A.Missing"), None);
    }

    #[test]
    fn names_that_would_alias_a_path_are_rejected() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();

        assert_eq!(
            world.spawn_actor(level, classes.actor_class(), "A.C"),
            Err(WorldError::InvalidName { name: "A.C".into() })
        );
        assert!(matches!(
            world.add_component(actor, classes.scene_component_class(), "Say\"Hi"),
            Err(WorldError::InvalidName { .. })
        ));
        assert!(matches!(
            world.add_object(None, classes.object_class(), ""),
            Err(WorldError::InvalidName { .. })
        ));
        assert!(matches!(
            world.add_unowned_component(Some(actor), classes.scene_component_class(), "x.y"),
            Err(WorldError::InvalidName { .. })
        ));

        let path = world.path_name(comp).unwrap();
        assert_eq!(path, "Main.A.C");
        assert_eq!(world.find_object(&path), Some(comp));
    }

    #[test]
    fn outer_chain_walk_finds_component_owner() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        let nested = world
            .add_object(Some(comp), classes.object_class(), "Nested")
            .unwrap();
        let loose = world.add_object(None, classes.object_class(), "Loose").unwrap();

        assert_eq!(world.first_actor_in_outer_chain(&classes, nested), Some(actor));
        assert_eq!(world.first_actor_in_outer_chain(&classes, comp), Some(actor));
        assert_eq!(world.first_actor_in_outer_chain(&classes, loose), None);
        assert_eq!(world.as_actor(&classes, nested), None);
        assert_eq!(world.as_actor(&classes, comp), Some(actor));
    }

    #[test]
    fn label_falls_back_to_name() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "Door_3").unwrap();
        assert_eq!(world.label(actor), Some("Door_3"));
        world.set_label(actor, "Front Door").unwrap();
        assert_eq!(world.label(actor), Some("Front Door"));
    }

    #[test]
    fn kind_checks_guard_mutations() {
        let (classes, mut world, level) = setup();
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let obj = world.add_object(None, classes.object_class(), "O").unwrap();
        assert_eq!(
            world.add_component(obj, classes.scene_component_class(), "C"),
            Err(WorldError::NotAnActor(obj))
        );
        assert_eq!(
            world.set_component_editable(actor, false),
            Err(WorldError::NotAComponent(actor))
        );
    }
}
