// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene outline: the host-ordered list of actors and components a picker browses.

use alloc::string::String;
use alloc::vec::Vec;

use crate::id::ObjectId;
use crate::world::World;

/// One row of a scene outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlinerItem {
    /// An actor row.
    Actor(ObjectId),
    /// A component row, normally listed under its owning actor.
    Component(ObjectId),
    /// A grouping row with no object behind it.
    Folder(String),
}

impl OutlinerItem {
    /// Returns the object behind the row, if any.
    #[must_use]
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            Self::Actor(id) | Self::Component(id) => Some(*id),
            Self::Folder(_) => None,
        }
    }
}

/// A provider of scene outline rows.
///
/// Filtering is left to the consumer; providers list everything they know.
pub trait SceneOutliner {
    /// Returns the rows in display order.
    fn items(&self) -> Vec<OutlinerItem>;
}

impl SceneOutliner for World {
    /// Lists every level as a folder, followed by its live actors, each
    /// followed by the components it owns.
    fn items(&self) -> Vec<OutlinerItem> {
        let mut items = Vec::new();
        for level in self.levels() {
            if let Some(name) = self.level_name(level) {
                items.push(OutlinerItem::Folder(name.into()));
            }
            for actor in self.actors_in(level) {
                items.push(OutlinerItem::Actor(actor));
                items.extend(self.components_of(actor).map(OutlinerItem::Component));
            }
        }
        items
    }
}
