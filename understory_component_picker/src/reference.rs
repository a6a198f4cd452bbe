// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The field value: a weak reference to a picked component.

use alloc::format;
use alloc::string::String;

use understory_scene::{ObjectId, ObjectQuery};

const FIELD_NAME: &str = "PickedComponent";
const NONE_TOKEN: &str = "None";

/// A field value referring to a component picked from the scene.
///
/// The reference is weak: it stores an [`ObjectId`] and resolves it on every
/// [`get`](Self::get), so a destroyed component simply stops resolving.
///
/// Equality is identity of the stored handle; two empty references are equal.
///
/// # Example
///
/// ```rust
/// use understory_component_picker::ComponentReference;
/// use understory_scene::{ClassQuery, ClassRegistry, World};
///
/// let classes = ClassRegistry::new();
/// let mut world = World::new();
/// let level = world.add_level("Main");
/// let actor = world.spawn_actor(level, classes.actor_class(), "Crate").unwrap();
/// let mesh = world
///     .add_component(actor, classes.scene_component_class(), "Mesh")
///     .unwrap();
///
/// let picked = ComponentReference::new(Some(mesh));
/// assert_eq!(picked.get(&world), Some(mesh));
///
/// world.destroy(mesh).unwrap();
/// assert_eq!(picked.get(&world), None);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentReference {
    component: Option<ObjectId>,
}

impl ComponentReference {
    /// Creates a reference to `component`, or an empty reference.
    #[must_use]
    pub const fn new(component: Option<ObjectId>) -> Self {
        Self { component }
    }

    /// Creates an empty reference.
    #[must_use]
    pub const fn empty() -> Self {
        Self { component: None }
    }

    /// Returns the referenced component if it still exists.
    #[must_use]
    pub fn get(&self, objects: &dyn ObjectQuery) -> Option<ObjectId> {
        self.component.filter(|&c| objects.is_alive(c))
    }

    /// Returns the stored handle without checking liveness.
    #[must_use]
    pub const fn component_id(&self) -> Option<ObjectId> {
        self.component
    }

    /// Returns `true` if no component was ever assigned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.component.is_none()
    }

    /// Exports the reference in its canonical text form.
    ///
    /// Live references export as `(PickedComponent="<path>")`; empty and
    /// stale references export as `(PickedComponent=None)`.
    #[must_use]
    pub fn export_text(&self, objects: &dyn ObjectQuery) -> String {
        match self.get(objects).and_then(|c| objects.path_name(c)) {
            Some(path) => format!("({FIELD_NAME}=\"{path}\")"),
            None => format!("({FIELD_NAME}={NONE_TOKEN})"),
        }
    }

    /// Parses the canonical text form produced by [`export_text`](Self::export_text).
    pub fn import_text(text: &str, objects: &dyn ObjectQuery) -> Result<Self, ImportError> {
        let malformed = || ImportError::Malformed(text.into());
        let body = text
            .trim()
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let (key, value) = body.split_once('=').ok_or_else(malformed)?;
        if key.trim() != FIELD_NAME {
            return Err(malformed());
        }
        let value = value.trim();
        if value == NONE_TOKEN {
            return Ok(Self::empty());
        }
        let path = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(malformed)?;
        objects
            .find_object(path)
            .map(|c| Self::new(Some(c)))
            .ok_or_else(|| ImportError::UnresolvedPath(path.into()))
    }
}

impl From<ObjectId> for ComponentReference {
    fn from(component: ObjectId) -> Self {
        Self::new(Some(component))
    }
}

/// Errors produced by [`ComponentReference::import_text`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The text is not a component reference.
    #[error("malformed component reference `{0}`")]
    Malformed(String),
    /// No live object has this path.
    #[error("no object found at `{0}`")]
    UnresolvedPath(String),
}
