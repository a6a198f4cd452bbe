// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field configuration read from property metadata.

use alloc::string::String;
use alloc::vec::Vec;

use crate::field::PropertyHandle;

/// Metadata key whose presence lets the field reference components of any actor in the level.
pub const META_ALLOW_ANY_ACTOR: &str = "AllowAnyActor";

/// Metadata key listing the classes (or interfaces) a pick must match, comma separated.
pub const META_ALLOWED_CLASSES: &str = "AllowedClasses";

/// Metadata key listing the classes (or interfaces) a pick must not match, comma separated.
pub const META_DISALLOWED_CLASSES: &str = "DisallowedClasses";

bitflags::bitflags! {
    /// Declared flags of the property being edited.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The value may not be cleared to `None`.
        const NO_CLEAR                 = 0b0000_0001;
        /// The value is read-only in the editor.
        const EDIT_CONST               = 0b0000_0010;
        /// The value may not be edited on templates (class defaults, archetypes).
        const DISABLE_EDIT_ON_TEMPLATE = 0b0000_0100;
    }
}

/// How a component picker field behaves, as declared by its metadata.
///
/// Built once when the field is first shown and immutable afterwards.
///
/// # Example
///
/// ```rust
/// use understory_component_picker::PickerConfig;
///
/// let config = PickerConfig::builder()
///     .allow_any_actor(true)
///     .allowed_classes("LightComponent, Damageable")
///     .build();
///
/// assert!(config.allow_any_actor());
/// assert!(config.allow_clear());
/// assert_eq!(config.allowed_classes(), ["LightComponent", "Damageable"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerConfig {
    allow_clear: bool,
    allow_any_actor: bool,
    allowed_classes: Vec<String>,
    disallowed_classes: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            allow_clear: true,
            allow_any_actor: false,
            allowed_classes: Vec::new(),
            disallowed_classes: Vec::new(),
        }
    }
}

impl PickerConfig {
    /// Starts a builder with the defaults: clearing allowed, owner actor only, no class filters.
    #[must_use]
    pub fn builder() -> PickerConfigBuilder {
        PickerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Reads the configuration from a property's flags and metadata.
    #[must_use]
    pub fn from_handle(handle: &dyn PropertyHandle) -> Self {
        Self {
            allow_clear: !handle.property_flags().contains(PropertyFlags::NO_CLEAR),
            allow_any_actor: handle.has_metadata(META_ALLOW_ANY_ACTOR),
            allowed_classes: parse_class_list(handle.metadata(META_ALLOWED_CLASSES).unwrap_or("")),
            disallowed_classes: parse_class_list(
                handle.metadata(META_DISALLOWED_CLASSES).unwrap_or(""),
            ),
        }
    }

    /// Whether the value may be cleared to `None`.
    #[must_use]
    pub fn allow_clear(&self) -> bool {
        self.allow_clear
    }

    /// Whether components of actors other than the field's owner may be picked.
    #[must_use]
    pub fn allow_any_actor(&self) -> bool {
        self.allow_any_actor
    }

    /// Class names a pick must match.
    #[must_use]
    pub fn allowed_classes(&self) -> &[String] {
        &self.allowed_classes
    }

    /// Class names a pick must not match.
    #[must_use]
    pub fn disallowed_classes(&self) -> &[String] {
        &self.disallowed_classes
    }
}

/// Builder for [`PickerConfig`].
#[derive(Clone, Debug)]
pub struct PickerConfigBuilder {
    config: PickerConfig,
}

impl PickerConfigBuilder {
    /// Sets whether the value may be cleared.
    #[must_use]
    pub fn allow_clear(mut self, allow: bool) -> Self {
        self.config.allow_clear = allow;
        self
    }

    /// Sets whether components of any actor in the owner's level may be picked.
    #[must_use]
    pub fn allow_any_actor(mut self, allow: bool) -> Self {
        self.config.allow_any_actor = allow;
        self
    }

    /// Sets the allowed classes from a comma-separated list.
    #[must_use]
    pub fn allowed_classes(mut self, list: &str) -> Self {
        self.config.allowed_classes = parse_class_list(list);
        self
    }

    /// Sets the disallowed classes from a comma-separated list.
    #[must_use]
    pub fn disallowed_classes(mut self, list: &str) -> Self {
        self.config.disallowed_classes = parse_class_list(list);
        self
    }

    /// Builds the [`PickerConfig`].
    #[must_use]
    pub fn build(self) -> PickerConfig {
        self.config
    }
}

/// Splits a comma-separated metadata value into trimmed, non-empty class names.
#[must_use]
pub fn parse_class_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
