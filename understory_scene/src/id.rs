// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity types for scene objects, classes, and levels.

use core::fmt;

/// Identifier for an object owned by the host (an actor, a component, or any
/// other object in the ownership hierarchy).
///
/// This is a small, copyable handle consisting of a slot index and a generation
/// counter. It never keeps the object alive.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On destruction, the slot is freed; any existing `ObjectId` that pointed to it is stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ObjectId`.
///
/// Stale `ObjectId`s never alias a different live object because the generation must match.
/// Use [`ObjectQuery::is_alive`](crate::ObjectQuery::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(u32, u32);

impl ObjectId {
    /// Creates a handle from a raw slot index and generation.
    ///
    /// Hosts with their own object tables use this to mint handles; the
    /// reference [`World`](crate::World) does it internally.
    #[must_use]
    #[inline]
    pub const fn from_raw(index: u32, generation: u32) -> Self {
        Self(index, generation)
    }

    /// Returns the slot index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the generation.
    #[must_use]
    #[inline]
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}

/// Identifier for a class (or interface) in a [`ClassQuery`](crate::ClassQuery).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClassId(u32);

impl ClassId {
    /// Creates a class identifier from its table index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying table index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a level: a partition of the world containing a set of actors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a level identifier from its table index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying table index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn object_id_identity_includes_generation() {
        let a = ObjectId::from_raw(3, 1);
        let b = ObjectId::from_raw(3, 2);
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
        assert_eq!(a, ObjectId::from_raw(3, 1));
    }

    #[test]
    fn object_id_display() {
        assert_eq!(format!("{}", ObjectId::from_raw(7, 2)), "#7v2");
    }

    #[test]
    fn class_and_level_ids_round_trip_index() {
        assert_eq!(ClassId::new(5).index(), 5);
        assert_eq!(LevelId::new(9).index(), 9);
    }
}
