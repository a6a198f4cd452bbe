// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scene: the host object model consumed by editor tooling.
//!
//! Editor widgets that pick or inspect scene objects need a small slice of the
//! host engine: which objects exist, what class they are, who owns whom, and
//! which level they live in. This crate expresses that slice as narrow traits
//! so tooling logic can be written and tested without a live engine:
//!
//! - [`ObjectId`]: a generational handle. It never keeps an object alive and
//!   stops resolving once the object is destroyed, so it doubles as a weak reference.
//! - [`ClassQuery`]: class lookup, subclass and interface queries.
//! - [`ObjectQuery`]: the ownership hierarchy (outer objects, owning actor, level, paths).
//! - [`SceneOutliner`]: a host-ordered outline of actors and components.
//!
//! [`ClassRegistry`] and [`World`] are in-memory implementations for hosts
//! without their own reflection system, and for tests.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_scene::{ClassQuery, ClassRegistry, ObjectQuery, ObjectQueryExt, World};
//!
//! let mut classes = ClassRegistry::new();
//! let light = classes
//!     .register_class("LightComponent", classes.scene_component_class())
//!     .unwrap();
//!
//! let mut world = World::new();
//! let level = world.add_level("Persistent");
//! let lamp = world.spawn_actor(level, classes.actor_class(), "Lamp").unwrap();
//! let bulb = world.add_component(lamp, light, "Bulb").unwrap();
//!
//! assert!(world.is_component(&classes, bulb));
//! assert_eq!(world.first_actor_in_outer_chain(&classes, bulb), Some(lamp));
//!
//! world.destroy(bulb).unwrap();
//! assert!(!world.is_alive(bulb));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod class;
mod id;
mod outliner;
mod world;

pub use class::{ClassFlags, ClassQuery, ClassRegistry, RegistryError};
pub use id::{ClassId, LevelId, ObjectId};
pub use outliner::{OutlinerItem, SceneOutliner};
pub use world::{ComponentVariable, ObjectQuery, ObjectQueryExt, World, WorldError};
