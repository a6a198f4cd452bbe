// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class filters: allowed and disallowed classes for actors and components.

use smallvec::SmallVec;
use understory_scene::{ClassFlags, ClassId, ClassQuery, ObjectId, ObjectQuery};

use crate::config::PickerConfig;

/// Allowed and disallowed classes for one kind of object.
///
/// An object passes when its class matches at least one allowed entry (or the
/// allowed list is empty) and matches no disallowed entry. A class matches an
/// entry when it derives from it or, for interface entries, implements it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassFilter {
    /// Classes an object must match; empty accepts everything.
    pub allowed: SmallVec<[ClassId; 4]>,
    /// Classes an object must not match.
    pub disallowed: SmallVec<[ClassId; 4]>,
}

impl ClassFilter {
    /// Returns `true` if neither list has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty() && self.disallowed.is_empty()
    }

    /// Applies the filter to a class.
    #[must_use]
    pub fn passes_class(&self, classes: &dyn ClassQuery, class: ClassId) -> bool {
        let mut allowed = true;

        if !self.allowed.is_empty() {
            allowed = self
                .allowed
                .iter()
                .any(|&entry| matches_entry(classes, class, entry));
        }

        if allowed && !self.disallowed.is_empty() {
            allowed = !self
                .disallowed
                .iter()
                .any(|&entry| matches_entry(classes, class, entry));
        }

        allowed
    }
}

fn matches_entry(classes: &dyn ClassQuery, class: ClassId, entry: ClassId) -> bool {
    classes.is_subclass_of(class, entry)
        || (classes.class_flags(entry).contains(ClassFlags::INTERFACE)
            && classes.implements_interface(class, entry))
}

/// Applies `allowed`/`disallowed` class lists to an object.
///
/// Dead objects never pass.
#[must_use]
pub fn is_filtered_object(
    classes: &dyn ClassQuery,
    objects: &dyn ObjectQuery,
    object: ObjectId,
    filter: &ClassFilter,
) -> bool {
    objects
        .class_of(object)
        .is_some_and(|class| filter.passes_class(classes, class))
}

/// The class filters of one picker field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickerFilters {
    /// Filters applied to the owning actor of a candidate.
    pub actor: ClassFilter,
    /// Filters applied to the candidate component itself.
    pub component: ClassFilter,
}

impl PickerFilters {
    /// Resolves the configured class names into filters.
    ///
    /// Names resolve through [`ClassQuery::find_class`], then
    /// [`ClassQuery::load_class`]; unknown names are skipped. Interfaces expand
    /// to every class currently implementing them. Actor classes only become
    /// actor filters when the field allows any actor; component classes become
    /// component filters; anything else is ignored.
    #[must_use]
    pub fn build(config: &PickerConfig, classes: &dyn ClassQuery) -> Self {
        let mut filters = Self::default();
        for name in config.allowed_classes() {
            for class in resolve(classes, name) {
                sort_into(
                    config,
                    classes,
                    class,
                    &mut filters.actor.allowed,
                    &mut filters.component.allowed,
                );
            }
        }
        for name in config.disallowed_classes() {
            for class in resolve(classes, name) {
                sort_into(
                    config,
                    classes,
                    class,
                    &mut filters.actor.disallowed,
                    &mut filters.component.disallowed,
                );
            }
        }
        filters
    }
}

fn resolve(classes: &dyn ClassQuery, name: &str) -> SmallVec<[ClassId; 4]> {
    let Some(class) = classes.find_class(name).or_else(|| classes.load_class(name)) else {
        tracing::warn!(class = name, "unknown class in component picker filter");
        return SmallVec::new();
    };
    if classes.class_flags(class).contains(ClassFlags::INTERFACE) {
        classes.implementors(class).into_iter().collect()
    } else {
        smallvec::smallvec![class]
    }
}

fn sort_into(
    config: &PickerConfig,
    classes: &dyn ClassQuery,
    class: ClassId,
    actor_list: &mut SmallVec<[ClassId; 4]>,
    component_list: &mut SmallVec<[ClassId; 4]>,
) {
    if config.allow_any_actor() && classes.is_subclass_of(class, classes.actor_class()) {
        actor_list.push(class);
    } else if classes.is_subclass_of(class, classes.component_class()) {
        component_list.push(class);
    } else {
        tracing::debug!(
            class = classes.class_name(class).unwrap_or("?"),
            "class ignored by component picker filter"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_scene::ClassRegistry;

    struct Fixture {
        classes: ClassRegistry,
        light: ClassId,
        spot: ClassId,
        audio: ClassId,
        toggle: ClassId,
        lamp: ClassId,
    }

    fn fixture() -> Fixture {
        let mut classes = ClassRegistry::new();
        let toggle = classes.register_interface("Toggleable", None).unwrap();
        let light = classes
            .register_class("LightComponent", classes.scene_component_class())
            .unwrap();
        let spot = classes.register_class("SpotLightComponent", light).unwrap();
        let audio = classes
            .register_class("AudioComponent", classes.scene_component_class())
            .unwrap();
        let lamp = classes.register_class("Lamp", classes.actor_class()).unwrap();
        classes.implement(light, toggle).unwrap();
        classes.implement(lamp, toggle).unwrap();
        Fixture {
            classes,
            light,
            spot,
            audio,
            toggle,
            lamp,
        }
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let f = fixture();
        assert!(ClassFilter::default().passes_class(&f.classes, f.audio));
    }

    #[test]
    fn allowed_matches_subclasses() {
        let f = fixture();
        let filter = ClassFilter {
            allowed: smallvec::smallvec![f.light],
            ..ClassFilter::default()
        };
        assert!(filter.passes_class(&f.classes, f.spot));
        assert!(!filter.passes_class(&f.classes, f.audio));
    }

    #[test]
    fn disallowed_wins_over_allowed() {
        let f = fixture();
        let filter = ClassFilter {
            allowed: smallvec::smallvec![f.light],
            disallowed: smallvec::smallvec![f.spot],
        };
        assert!(filter.passes_class(&f.classes, f.light));
        assert!(!filter.passes_class(&f.classes, f.spot));
    }

    #[test]
    fn interface_entries_match_implementors() {
        let f = fixture();
        let filter = ClassFilter {
            allowed: smallvec::smallvec![f.toggle],
            ..ClassFilter::default()
        };
        assert!(filter.passes_class(&f.classes, f.spot));
        assert!(!filter.passes_class(&f.classes, f.audio));
    }

    #[test]
    fn build_expands_interfaces_and_sorts_by_kind() {
        let f = fixture();
        let config = PickerConfig::builder()
            .allow_any_actor(true)
            .allowed_classes("Toggleable")
            .disallowed_classes("AudioComponent, Missing")
            .build();
        let filters = PickerFilters::build(&config, &f.classes);

        assert_eq!(filters.actor.allowed.as_slice(), &[f.lamp]);
        assert_eq!(filters.component.allowed.as_slice(), &[f.light, f.spot]);
        assert_eq!(filters.component.disallowed.as_slice(), &[f.audio]);
        assert!(filters.actor.disallowed.is_empty());
    }

    #[test]
    fn actor_classes_are_dropped_without_allow_any_actor() {
        let f = fixture();
        let config = PickerConfig::builder().allowed_classes("Lamp, Object").build();
        let filters = PickerFilters::build(&config, &f.classes);
        assert!(filters.actor.is_empty());
        assert!(filters.component.is_empty());
    }
}
