// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The field controller: reads, validates, writes, and self-heals a component reference.

use alloc::string::String;

use understory_scene::{ClassId, ObjectId, ObjectQueryExt};

use crate::config::{PickerConfig, PropertyFlags};
use crate::field::{PropertyAccess, PropertyHandle, PropertyValue};
use crate::filter::{PickerFilters, is_filtered_object};
use crate::host::{PickerContext, PickerServices};
use crate::menu::{CandidateFilter, ComponentPickerMenu, MenuAction, PickerCommand};
use crate::reference::ComponentReference;

/// Errors produced by [`ComponentPickerCustomization::dispatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// A command arrived while the popup was closed.
    #[error("the component picker popup is closed")]
    MenuClosed,
    /// The popup does not currently offer this action.
    #[error("the component picker does not offer {0:?} right now")]
    Unavailable(MenuAction),
}

/// What the combo button shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComboContent {
    /// The `<multiple values>` placeholder.
    MultipleValues,
    /// The actor and component rows.
    Value,
}

/// Status indicator next to the value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueStatus {
    /// The value could not be read.
    Error,
    /// Nothing to report.
    Ok,
}

/// Why the combo button is disabled for the current selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditRestriction {
    /// The field belongs to struct defaults with no containing object.
    StructDefaults,
    /// A containing object is a class default object.
    ClassDefaultObject,
}

impl EditRestriction {
    /// Returns the tooltip explaining the restriction.
    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::StructDefaults => "Editing this value in structure's defaults is not allowed",
            Self::ClassDefaultObject => "Editing this value in a Class Default Object is not allowed",
        }
    }
}

/// Controller for one component picker field.
///
/// Owns the field's [`PropertyHandle`] and a cache of the resolved owner actor
/// and component. Host capabilities are passed into every call as a
/// [`PickerContext`]; call [`on_property_value_changed`] whenever the field's
/// value changes from outside this controller.
///
/// [`on_property_value_changed`]: Self::on_property_value_changed
///
/// # Example
///
/// ```rust
/// use understory_component_picker::{
///     ComponentPickerCustomization, ComponentReference, HostFlags, MemoryField, PickerContext,
///     PropertyValue,
/// };
/// use understory_scene::{ClassQuery, ClassRegistry, World};
///
/// let classes = ClassRegistry::new();
/// let mut world = World::new();
/// let level = world.add_level("Main");
/// let actor = world.spawn_actor(level, classes.actor_class(), "Door").unwrap();
/// let hinge = world
///     .add_component(actor, classes.scene_component_class(), "Hinge")
///     .unwrap();
///
/// let host = HostFlags::default();
/// let cx = PickerContext::new(&classes, &world, &host);
/// let mut picker = ComponentPickerCustomization::new(MemoryField::new([actor]), &cx);
///
/// assert!(picker.set_value(&cx, &ComponentReference::from(hinge)));
/// assert_eq!(picker.cached_component(), Some(hinge));
/// assert_eq!(
///     picker.get_value(&cx),
///     PropertyValue::Success(ComponentReference::from(hinge))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ComponentPickerCustomization<P> {
    handle: P,
    config: PickerConfig,
    filters: PickerFilters,
    cached_outer_actor: Option<ObjectId>,
    cached_component: Option<ObjectId>,
    cached_access: PropertyAccess,
    menu: Option<ComponentPickerMenu>,
}

impl<P: PropertyHandle> ComponentPickerCustomization<P> {
    /// Creates the controller for a field and computes the caches.
    ///
    /// An invalid stored value is not cached, but it is not cleared either;
    /// only [`on_property_value_changed`](Self::on_property_value_changed) writes back.
    pub fn new(handle: P, cx: &PickerContext<'_>) -> Self {
        let config = PickerConfig::from_handle(&handle);
        let filters = PickerFilters::build(&config, cx.classes);
        let mut this = Self {
            handle,
            config,
            filters,
            cached_outer_actor: None,
            cached_component: None,
            cached_access: PropertyAccess::Fail,
            menu: None,
        };

        this.cached_outer_actor = this.first_outer_actor(cx);
        let value = this.get_value(cx);
        this.cached_access = value.access();
        if let PropertyValue::Success(reference) = value {
            if this.is_component_picker_valid(cx, &reference) {
                this.cached_component = reference.get(cx.objects);
            }
        }
        this
    }

    /// Reads the field across every edited object.
    ///
    /// Returns [`PropertyValue::Fail`] during host hazard windows, for an
    /// invalid handle, or when no object has storage for the field.
    #[must_use]
    pub fn get_value(&self, cx: &PickerContext<'_>) -> PropertyValue {
        if cx.host.is_read_hazard() {
            tracing::trace!("component picker read refused during host hazard window");
            return PropertyValue::Fail;
        }
        if !self.handle.is_valid_handle() {
            return PropertyValue::Fail;
        }

        let mut result = PropertyValue::Fail;
        let mut current = None;
        for slot in self.handle.raw_values() {
            let found = matches!(result, PropertyValue::Success(_));
            match slot {
                None if found => {
                    result = PropertyValue::MultipleValues;
                    break;
                }
                None => {}
                Some(reference) if found => {
                    if reference.get(cx.objects) != current {
                        result = PropertyValue::MultipleValues;
                        break;
                    }
                }
                Some(reference) => {
                    current = reference.get(cx.objects);
                    result = PropertyValue::Success(reference);
                }
            }
        }
        result
    }

    /// Writes `value` to the field if it is empty or passes
    /// [`is_component_picker_valid`](Self::is_component_picker_valid), then
    /// refreshes the caches. Always closes the popup.
    ///
    /// The refresh never writes again, even if the handle still reports an
    /// invalid value; clearing that is left to
    /// [`on_property_value_changed`](Self::on_property_value_changed).
    ///
    /// Returns `false` if the value was refused.
    ///
    /// # Panics
    ///
    /// Panics if the handle rejects the formatted value of a reference that
    /// passed validation.
    pub fn set_value(&mut self, cx: &PickerContext<'_>, value: &ComponentReference) -> bool {
        self.close_menu();

        if !value.is_empty() && !self.is_component_picker_valid(cx, value) {
            tracing::debug!(
                component = ?value.component_id(),
                "component picker refused an invalid value"
            );
            return false;
        }

        let text = value.export_text(cx.objects);
        let result = self.handle.set_value_from_formatted_string(&text, cx.objects);
        assert_eq!(
            result,
            PropertyAccess::Success,
            "property handle rejected validated value `{text}`"
        );

        self.refresh_caches(cx);
        true
    }

    /// Returns `true` if the field may hold `value` in the current context.
    ///
    /// Empty and stale references are always valid.
    #[must_use]
    pub fn is_component_picker_valid(
        &self,
        cx: &PickerContext<'_>,
        value: &ComponentReference,
    ) -> bool {
        let Some(component) = value.get(cx.objects) else {
            return true;
        };
        let owner = cx.objects.owner(component);

        if !self.config.allow_any_actor() && owner != self.cached_outer_actor {
            return false;
        }
        if !self.is_filtered_component(cx, component) {
            return false;
        }

        if self.config.allow_any_actor() {
            let Some(owner) = owner else {
                return false;
            };
            let level = cx.objects.level(owner);
            for outer in self.handle.outer_objects() {
                if let Some(actor) = cx.objects.as_actor(cx.classes, outer) {
                    if cx.objects.level(actor) != level {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Returns `true` if components of `actor` may be picked.
    #[must_use]
    pub fn is_allowed_actor(&self, actor: ObjectId) -> bool {
        self.config.allow_any_actor() || Some(actor) == self.cached_outer_actor
    }

    /// Returns `true` if `component` may be offered and picked.
    #[must_use]
    pub fn is_filtered_component(&self, cx: &PickerContext<'_>, component: ObjectId) -> bool {
        let Some(owner) = cx.objects.owner(component) else {
            return false;
        };
        if !self.is_allowed_actor(owner) {
            return false;
        }

        if self.config.allow_any_actor() {
            let Some(outer_actor) = self.cached_outer_actor else {
                return false;
            };
            if cx.objects.level(owner) != cx.objects.level(outer_actor) {
                return false;
            }
        } else if Some(owner) != self.cached_outer_actor {
            return false;
        }

        cx.objects.can_edit_component(component)
            && is_filtered_object(cx.classes, cx.objects, component, &self.filters.component)
            && is_filtered_object(cx.classes, cx.objects, owner, &self.filters.actor)
    }

    /// Returns the first actor found walking outward from each containing
    /// object in turn.
    #[must_use]
    pub fn first_outer_actor(&self, cx: &PickerContext<'_>) -> Option<ObjectId> {
        self.handle
            .outer_objects()
            .into_iter()
            .find_map(|outer| cx.objects.first_actor_in_outer_chain(cx.classes, outer))
    }

    /// Recomputes the caches after the field's value changed.
    ///
    /// A value that is no longer valid is cleared by writing an empty
    /// reference back to the field.
    pub fn on_property_value_changed(&mut self, cx: &PickerContext<'_>) {
        let Some(stale) = self.refresh_caches(cx) else {
            return;
        };
        tracing::debug!(
            component = ?stale.component_id(),
            "component picker cleared a value that is no longer valid"
        );
        if !stale.is_empty() {
            self.set_value(cx, &ComponentReference::empty());
        }
    }

    /// Recomputes the caches from the handle and returns the stored value if it
    /// is a single value that is no longer valid.
    fn refresh_caches(&mut self, cx: &PickerContext<'_>) -> Option<ComponentReference> {
        self.cached_component = None;
        self.cached_outer_actor = self.first_outer_actor(cx);

        let value = self.get_value(cx);
        self.cached_access = value.access();
        let PropertyValue::Success(reference) = value else {
            return None;
        };
        if !self.is_component_picker_valid(cx, &reference) {
            return Some(reference);
        }
        self.cached_component = reference.get(cx.objects);
        None
    }

    /// Returns `true` if the field is editable.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        !self.handle.is_edit_const()
    }

    /// Returns `true` if the raw child rows are editable, which is only the
    /// case without a live owner actor.
    #[must_use]
    pub fn can_edit_children(&self, cx: &PickerContext<'_>) -> bool {
        self.can_edit()
            && !self
                .cached_outer_actor
                .is_some_and(|actor| cx.objects.is_alive(actor))
    }

    /// Returns why the combo button must be disabled, if it must.
    #[must_use]
    pub fn edit_restriction(&self, cx: &PickerContext<'_>) -> Option<EditRestriction> {
        if !self
            .handle
            .property_flags()
            .intersects(PropertyFlags::EDIT_CONST | PropertyFlags::DISABLE_EDIT_ON_TEMPLATE)
        {
            return None;
        }

        let outers = self.handle.outer_objects();
        if outers.is_empty() {
            return Some(EditRestriction::StructDefaults);
        }
        let level_script = cx.classes.level_script_actor_class();
        outers
            .iter()
            .any(|&o| cx.objects.is_template(o) && !cx.objects.is_a(cx.classes, o, level_script))
            .then_some(EditRestriction::ClassDefaultObject)
    }

    /// Returns which content the combo button shows.
    #[must_use]
    pub fn combo_content(&self) -> ComboContent {
        match self.cached_access {
            PropertyAccess::MultipleValues => ComboContent::MultipleValues,
            _ => ComboContent::Value,
        }
    }

    /// Returns the status indicator.
    #[must_use]
    pub fn status(&self) -> ValueStatus {
        match self.cached_access {
            PropertyAccess::Fail => ValueStatus::Error,
            _ => ValueStatus::Ok,
        }
    }

    /// Returns `true` if the combo button shows the owner actor row.
    #[must_use]
    pub fn shows_actor_row(&self) -> bool {
        self.config.allow_any_actor()
    }

    /// Label of the cached component's owner.
    #[must_use]
    pub fn actor_label(&self, cx: &PickerContext<'_>) -> String {
        self.cached_owner(cx)
            .and_then(|owner| cx.objects.label(owner))
            .unwrap_or("None")
            .into()
    }

    /// Label of the cached component.
    ///
    /// Prefers the owner's member variable name, unless that variable is an array.
    #[must_use]
    pub fn component_label(&self, cx: &PickerContext<'_>) -> String {
        match self.cached_access {
            PropertyAccess::Success => {
                let Some(component) = self.live_cached_component(cx) else {
                    return "None".into();
                };
                if let Some(variable) = cx
                    .objects
                    .component_variable(component)
                    .filter(|v| !v.is_array)
                {
                    return variable.name.clone();
                }
                cx.objects.name(component).unwrap_or("None").into()
            }
            PropertyAccess::MultipleValues => "Multiple Values".into(),
            PropertyAccess::Fail => "None".into(),
        }
    }

    /// Class whose icon represents the owner actor.
    #[must_use]
    pub fn actor_icon_class(&self, cx: &PickerContext<'_>) -> ClassId {
        self.cached_owner(cx)
            .and_then(|owner| cx.objects.class_of(owner))
            .unwrap_or_else(|| cx.classes.actor_class())
    }

    /// Class whose icon represents the component.
    #[must_use]
    pub fn component_icon_class(&self, cx: &PickerContext<'_>) -> ClassId {
        self.live_cached_component(cx)
            .and_then(|component| cx.objects.class_of(component))
            .unwrap_or_else(|| cx.classes.component_class())
    }

    fn live_cached_component(&self, cx: &PickerContext<'_>) -> Option<ObjectId> {
        self.cached_component.filter(|&c| cx.objects.is_alive(c))
    }

    fn cached_owner(&self, cx: &PickerContext<'_>) -> Option<ObjectId> {
        self.live_cached_component(cx)
            .and_then(|component| cx.objects.owner(component))
    }

    /// Opens the popup for the cached value, if that component is still alive.
    pub fn open_menu(&mut self, cx: &PickerContext<'_>) -> &ComponentPickerMenu {
        tracing::trace!("component picker popup opened");
        let initial = self.live_cached_component(cx);
        self.menu
            .insert(ComponentPickerMenu::new(initial, self.config.allow_clear()))
    }

    /// Handles the host's open-state notification; a closed popup drops its content.
    pub fn on_menu_open_changed(&mut self, open: bool) {
        if !open {
            self.close_menu();
        }
    }

    /// Closes the popup.
    pub fn close_menu(&mut self) {
        if self.menu.take().is_some() {
            tracing::trace!("component picker popup closed");
        }
    }

    /// Returns `true` while the popup is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Returns the open popup's content.
    #[must_use]
    pub fn menu(&self) -> Option<&ComponentPickerMenu> {
        self.menu.as_ref()
    }

    /// Returns the browse predicates of this field.
    #[must_use]
    pub fn candidates<'c>(&'c self, cx: &'c PickerContext<'c>) -> PickerCandidates<'c, P> {
        PickerCandidates { picker: self, cx }
    }

    /// Runs a popup command.
    ///
    /// Every accepted command closes the popup. A rejected command leaves it open.
    pub fn dispatch(
        &mut self,
        cx: &PickerContext<'_>,
        services: &mut PickerServices<'_>,
        command: PickerCommand,
    ) -> Result<(), PickerError> {
        let menu = self.menu.ok_or(PickerError::MenuClosed)?;
        let action = match command {
            PickerCommand::Edit => Some(MenuAction::Edit),
            PickerCommand::Copy => Some(MenuAction::Copy),
            PickerCommand::Paste => Some(MenuAction::Paste),
            PickerCommand::Clear => Some(MenuAction::Clear),
            PickerCommand::Select(_) | PickerCommand::Close => None,
        };
        if let Some(action) = action {
            if !menu.offers(action, cx, &*services.clipboard) {
                return Err(PickerError::Unavailable(action));
            }
        }

        self.close_menu();
        match command {
            PickerCommand::Edit => {
                if let Some(component) = menu.live_component(cx) {
                    services.editor.edit_object(component);
                }
            }
            PickerCommand::Copy => {
                if let Some(text) = menu.copy_text(cx) {
                    services.clipboard.set_text(&text);
                }
            }
            PickerCommand::Paste => {
                let candidate = {
                    let view = PickerCandidates { picker: &*self, cx };
                    ComponentPickerMenu::paste_candidate(cx, &*services.clipboard, &view)
                };
                self.set_value(cx, &ComponentReference::new(candidate));
            }
            PickerCommand::Clear => {
                self.set_value(cx, &ComponentReference::empty());
            }
            PickerCommand::Select(component) => {
                self.set_value(cx, &ComponentReference::from(component));
            }
            PickerCommand::Close => {}
        }
        Ok(())
    }

    /// The field's property handle.
    #[must_use]
    pub fn handle(&self) -> &P {
        &self.handle
    }

    /// Mutable access to the property handle, for hosts that edit it directly.
    ///
    /// Call [`on_property_value_changed`](Self::on_property_value_changed) afterwards.
    pub fn handle_mut(&mut self) -> &mut P {
        &mut self.handle
    }

    /// The field's configuration.
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// The resolved class filters.
    #[must_use]
    pub fn filters(&self) -> &PickerFilters {
        &self.filters
    }

    /// The cached component, if the current value is a valid single value.
    #[must_use]
    pub fn cached_component(&self) -> Option<ObjectId> {
        self.cached_component
    }

    /// The cached owner actor of the edited objects.
    #[must_use]
    pub fn cached_outer_actor(&self) -> Option<ObjectId> {
        self.cached_outer_actor
    }

    /// The outcome of the last read.
    #[must_use]
    pub fn cached_access(&self) -> PropertyAccess {
        self.cached_access
    }
}

/// [`CandidateFilter`] view of a picker, handed to the scene browser.
#[derive(Debug)]
pub struct PickerCandidates<'c, P> {
    picker: &'c ComponentPickerCustomization<P>,
    cx: &'c PickerContext<'c>,
}

impl<P: PropertyHandle> CandidateFilter for PickerCandidates<'_, P> {
    fn allows_actor(&self, actor: ObjectId) -> bool {
        self.picker.is_allowed_actor(actor)
    }

    fn allows_component(&self, component: ObjectId) -> bool {
        self.picker.is_filtered_component(self.cx, component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MemoryField;
    use crate::host::HostFlags;
    use understory_scene::{ClassQuery, ClassRegistry, ComponentVariable, World};

    struct Scene {
        classes: ClassRegistry,
        world: World,
        actor: ObjectId,
        comp: ObjectId,
    }

    fn scene() -> Scene {
        let classes = ClassRegistry::new();
        let mut world = World::new();
        let level = world.add_level("Main");
        let actor = world.spawn_actor(level, classes.actor_class(), "A").unwrap();
        let comp = world
            .add_component(actor, classes.scene_component_class(), "C")
            .unwrap();
        Scene {
            classes,
            world,
            actor,
            comp,
        }
    }

    #[test]
    fn hazard_window_fails_reads() {
        let s = scene();
        let host = HostFlags {
            saving_package: true,
            ..HostFlags::default()
        };
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let field = MemoryField::new([s.actor]).with_value(s.comp.into());
        let picker = ComponentPickerCustomization::new(field, &cx);
        assert_eq!(picker.get_value(&cx), PropertyValue::Fail);
        assert_eq!(picker.status(), ValueStatus::Error);
        assert_eq!(picker.cached_component(), None);
    }

    #[test]
    fn no_storage_fails_and_null_after_value_is_mixed() {
        let s = scene();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);

        let none = ComponentPickerCustomization::new(MemoryField::new([]), &cx);
        assert_eq!(none.get_value(&cx), PropertyValue::Fail);

        let leading_null = MemoryField::new([s.actor, s.actor])
            .with_values([None, Some(ComponentReference::from(s.comp))]);
        let picker = ComponentPickerCustomization::new(leading_null, &cx);
        assert_eq!(
            picker.get_value(&cx),
            PropertyValue::Success(ComponentReference::from(s.comp))
        );

        let trailing_null = MemoryField::new([s.actor, s.actor])
            .with_values([Some(ComponentReference::from(s.comp)), None]);
        let picker = ComponentPickerCustomization::new(trailing_null, &cx);
        assert_eq!(picker.get_value(&cx), PropertyValue::MultipleValues);
        assert_eq!(picker.combo_content(), ComboContent::MultipleValues);
        assert_eq!(picker.component_label(&cx), "Multiple Values");
    }

    #[test]
    fn construction_does_not_write_invalid_values() {
        let mut s = scene();
        let level = s.world.levels().next().unwrap();
        let other = s
            .world
            .spawn_actor(level, s.classes.actor_class(), "B")
            .unwrap();
        let foreign = s
            .world
            .add_component(other, s.classes.scene_component_class(), "X")
            .unwrap();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);

        let field = MemoryField::new([s.actor]).with_value(foreign.into());
        let picker = ComponentPickerCustomization::new(field, &cx);
        assert_eq!(picker.cached_component(), None);
        assert_eq!(picker.cached_access(), PropertyAccess::Success);
        assert!(picker.handle().writes().is_empty());
    }

    #[test]
    #[should_panic(expected = "property handle rejected validated value")]
    fn rejected_formatted_write_panics() {
        let s = scene();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let mut picker = ComponentPickerCustomization::new(MemoryField::new([s.actor]), &cx);
        picker.handle_mut().invalidate();
        picker.set_value(&cx, &ComponentReference::empty());
    }

    #[test]
    fn labels_prefer_scalar_variable_names() {
        let mut s = scene();
        s.world.set_label(s.actor, "Front Door").unwrap();
        s.world
            .set_component_variable(
                s.comp,
                Some(ComponentVariable {
                    name: "HingeComponent".into(),
                    is_array: false,
                }),
            )
            .unwrap();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let field = MemoryField::new([s.actor]).with_value(s.comp.into());
        let picker = ComponentPickerCustomization::new(field, &cx);

        assert_eq!(picker.actor_label(&cx), "Front Door");
        assert_eq!(picker.component_label(&cx), "HingeComponent");
        assert_eq!(picker.component_icon_class(&cx), s.classes.scene_component_class());
        assert_eq!(picker.actor_icon_class(&cx), s.classes.actor_class());
    }

    #[test]
    fn array_variables_fall_back_to_object_name() {
        let mut s = scene();
        s.world
            .set_component_variable(
                s.comp,
                Some(ComponentVariable {
                    name: "Parts".into(),
                    is_array: true,
                }),
            )
            .unwrap();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let field = MemoryField::new([s.actor]).with_value(s.comp.into());
        let picker = ComponentPickerCustomization::new(field, &cx);
        assert_eq!(picker.component_label(&cx), "C");

        let empty = ComponentPickerCustomization::new(MemoryField::new([s.actor]), &cx);
        assert_eq!(empty.component_label(&cx), "None");
        assert_eq!(empty.actor_label(&cx), "None");
        assert_eq!(empty.component_icon_class(&cx), s.classes.component_class());
    }

    #[test]
    fn edit_restrictions_follow_flags_and_templates() {
        let mut s = scene();
        let host = HostFlags::default();

        let restricted = PropertyFlags::DISABLE_EDIT_ON_TEMPLATE;
        {
            let cx = PickerContext::new(&s.classes, &s.world, &host);
            let picker = ComponentPickerCustomization::new(
                MemoryField::new([]).with_flags(restricted),
                &cx,
            );
            assert_eq!(
                picker.edit_restriction(&cx),
                Some(EditRestriction::StructDefaults)
            );

            let picker = ComponentPickerCustomization::new(
                MemoryField::new([s.actor]).with_flags(restricted),
                &cx,
            );
            assert_eq!(picker.edit_restriction(&cx), None);

            let unflagged = ComponentPickerCustomization::new(MemoryField::new([]), &cx);
            assert_eq!(unflagged.edit_restriction(&cx), None);
        }

        s.world.set_template(s.actor, true).unwrap();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let picker = ComponentPickerCustomization::new(
            MemoryField::new([s.actor]).with_flags(restricted),
            &cx,
        );
        assert_eq!(
            picker.edit_restriction(&cx),
            Some(EditRestriction::ClassDefaultObject)
        );
        assert_eq!(
            EditRestriction::ClassDefaultObject.tooltip(),
            "Editing this value in a Class Default Object is not allowed"
        );
    }

    #[test]
    fn level_script_templates_stay_editable() {
        let mut s = scene();
        let level = s.world.levels().next().unwrap();
        let script = s
            .world
            .spawn_actor(level, s.classes.level_script_actor_class(), "Script")
            .unwrap();
        s.world.set_template(script, true).unwrap();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let picker = ComponentPickerCustomization::new(
            MemoryField::new([script]).with_flags(PropertyFlags::EDIT_CONST),
            &cx,
        );
        assert_eq!(picker.edit_restriction(&cx), None);
        assert!(!picker.can_edit());
    }

    #[test]
    fn children_are_editable_only_without_owner_actor() {
        let s = scene();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);

        let owned = ComponentPickerCustomization::new(MemoryField::new([s.actor]), &cx);
        assert!(owned.can_edit());
        assert!(!owned.can_edit_children(&cx));

        let loose = ComponentPickerCustomization::new(MemoryField::new([]), &cx);
        assert!(loose.can_edit_children(&cx));
    }

    #[test]
    fn menu_open_close_transitions() {
        let s = scene();
        let host = HostFlags::default();
        let cx = PickerContext::new(&s.classes, &s.world, &host);
        let field = MemoryField::new([s.actor]).with_value(s.comp.into());
        let mut picker = ComponentPickerCustomization::new(field, &cx);

        assert!(!picker.is_menu_open());
        assert_eq!(picker.open_menu(&cx).initial_component(), Some(s.comp));
        assert!(picker.is_menu_open());
        picker.on_menu_open_changed(true);
        assert!(picker.is_menu_open());
        picker.on_menu_open_changed(false);
        assert!(picker.menu().is_none());
    }
}
