// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection popup: current-value actions plus a filtered scene browser.
//!
//! [`ComponentPickerMenu`] describes what the popup offers and evaluates each
//! entry against the host. It performs no writes itself; the
//! [`ComponentPickerCustomization`](crate::ComponentPickerCustomization)
//! dispatches [`PickerCommand`]s and applies their effects.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_scene::{ObjectId, ObjectQueryExt, OutlinerItem, SceneOutliner};

use crate::host::{Clipboard, PickerContext};

/// Decides which scene outline rows the picker may show.
pub trait CandidateFilter {
    /// Returns `true` if the actor may be shown.
    fn allows_actor(&self, actor: ObjectId) -> bool;

    /// Returns `true` if the component may be shown and picked.
    fn allows_component(&self, component: ObjectId) -> bool;
}

/// A command sent to the open popup by whichever front end drives it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerCommand {
    /// Open the current component in the editor.
    Edit,
    /// Copy the current component to the clipboard.
    Copy,
    /// Paste a component from the clipboard.
    Paste,
    /// Clear the value.
    Clear,
    /// Pick a component from the browser.
    Select(ObjectId),
    /// Close the popup without changing anything.
    Close,
}

/// The action behind a popup menu entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Edit the current component.
    Edit,
    /// Copy the current component.
    Copy,
    /// Paste from the clipboard.
    Paste,
    /// Clear the value.
    Clear,
}

impl MenuAction {
    /// Returns the entry label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::Clear => "Clear",
        }
    }

    /// Returns the entry tooltip.
    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::Edit => "Edit this component",
            Self::Copy => "Copies the component to the clipboard",
            Self::Paste => "Pastes a component from the clipboard to this field",
            Self::Clear => "Clears the component set on this field",
        }
    }
}

/// One entry of the "current component" section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// What the entry does.
    pub action: MenuAction,
    /// Display label.
    pub label: &'static str,
    /// Hover text.
    pub tooltip: &'static str,
    /// Whether the entry can be activated right now.
    pub enabled: bool,
}

impl MenuEntry {
    /// Creates an entry with the action's label and tooltip.
    #[must_use]
    pub const fn new(action: MenuAction, enabled: bool) -> Self {
        Self {
            action,
            label: action.label(),
            tooltip: action.tooltip(),
            enabled,
        }
    }
}

/// One visible row of the browse section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseEntry {
    /// The outline row.
    pub item: OutlinerItem,
    /// Whether the row can be picked. Actor rows are shown for context only.
    pub interactive: bool,
}

/// Errors produced by [`ClipboardPayload::parse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardParseError {
    /// The text has no space separating class and object paths.
    #[error("clipboard text has no class/object separator")]
    MissingSeparator,
    /// The class path is empty.
    #[error("clipboard text has an empty class path")]
    EmptyClass,
    /// The object path is empty.
    #[error("clipboard text has an empty object path")]
    EmptyPath,
}

/// The clipboard form of a copied component: `"<class path> <object path>"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Path of the component's class.
    pub class_path: String,
    /// Path of the component.
    pub object_path: String,
}

impl ClipboardPayload {
    /// Splits clipboard text at the first space.
    pub fn parse(text: &str) -> Result<Self, ClipboardParseError> {
        let (class_path, object_path) = text
            .split_once(' ')
            .ok_or(ClipboardParseError::MissingSeparator)?;
        let object_path = object_path.trim();
        if class_path.is_empty() {
            return Err(ClipboardParseError::EmptyClass);
        }
        if object_path.is_empty() {
            return Err(ClipboardParseError::EmptyPath);
        }
        Ok(Self {
            class_path: class_path.into(),
            object_path: object_path.into(),
        })
    }
}

impl core::fmt::Display for ClipboardPayload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.class_path, self.object_path)
    }
}

/// The content of an open picker popup.
///
/// Built from the cached value when the popup opens and discarded when it closes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComponentPickerMenu {
    initial_component: Option<ObjectId>,
    allow_clear: bool,
}

impl ComponentPickerMenu {
    /// Creates the popup content for the given current value.
    #[must_use]
    pub const fn new(initial_component: Option<ObjectId>, allow_clear: bool) -> Self {
        Self {
            initial_component,
            allow_clear,
        }
    }

    /// The component referenced when the popup opened.
    #[must_use]
    pub const fn initial_component(&self) -> Option<ObjectId> {
        self.initial_component
    }

    /// The initial component, if it is still alive.
    #[must_use]
    pub fn live_component(&self, cx: &PickerContext<'_>) -> Option<ObjectId> {
        self.initial_component.filter(|&c| cx.objects.is_alive(c))
    }

    /// Whether the popup offers clearing.
    #[must_use]
    pub const fn allow_clear(&self) -> bool {
        self.allow_clear
    }

    /// Returns the entries of the "current component" section, in display order.
    #[must_use]
    pub fn entries(
        &self,
        cx: &PickerContext<'_>,
        clipboard: &dyn Clipboard,
    ) -> SmallVec<[MenuEntry; 4]> {
        let mut entries = SmallVec::new();
        if self.live_component(cx).is_some() {
            entries.push(MenuEntry::new(MenuAction::Edit, true));
        }
        entries.push(MenuEntry::new(MenuAction::Copy, true));
        entries.push(MenuEntry::new(MenuAction::Paste, Self::can_paste(cx, clipboard)));
        if self.allow_clear {
            entries.push(MenuEntry::new(MenuAction::Clear, true));
        }
        entries
    }

    /// Returns `true` if `action` is listed and enabled.
    #[must_use]
    pub fn offers(
        &self,
        action: MenuAction,
        cx: &PickerContext<'_>,
        clipboard: &dyn Clipboard,
    ) -> bool {
        self.entries(cx, clipboard)
            .iter()
            .any(|e| e.action == action && e.enabled)
    }

    /// Returns the clipboard text for the current component, if it still exists.
    #[must_use]
    pub fn copy_text(&self, cx: &PickerContext<'_>) -> Option<String> {
        let component = self.live_component(cx)?;
        let class = cx.objects.class_of(component)?;
        let class_path = cx.classes.class_name(class)?;
        let object_path = cx.objects.path_name(component)?;
        Some(format!("{class_path} {object_path}"))
    }

    /// Returns `true` if the clipboard names a loadable component class and a
    /// live component of that class.
    #[must_use]
    pub fn can_paste(cx: &PickerContext<'_>, clipboard: &dyn Clipboard) -> bool {
        Self::resolve_clipboard(cx, clipboard).is_some()
    }

    /// Returns the clipboard's component if it may be assigned: it must also
    /// have an owner, and both it and its owner must pass `filter`.
    #[must_use]
    pub fn paste_candidate(
        cx: &PickerContext<'_>,
        clipboard: &dyn Clipboard,
        filter: &dyn CandidateFilter,
    ) -> Option<ObjectId> {
        let component = Self::resolve_clipboard(cx, clipboard)?;
        let owner = cx.objects.owner(component)?;
        (filter.allows_component(component) && filter.allows_actor(owner)).then_some(component)
    }

    fn resolve_clipboard(cx: &PickerContext<'_>, clipboard: &dyn Clipboard) -> Option<ObjectId> {
        let payload = ClipboardPayload::parse(&clipboard.text()).ok()?;
        let class = cx.classes.load_class(&payload.class_path)?;
        if !cx.classes.is_subclass_of(class, cx.classes.component_class()) {
            return None;
        }
        let component = cx.objects.find_object(&payload.object_path)?;
        (cx.objects.is_component(cx.classes, component)
            && cx.objects.is_a(cx.classes, component, class))
        .then_some(component)
    }

    /// Returns the outline rows the browse section shows.
    ///
    /// Live actors passing [`CandidateFilter::allows_actor`] and live components
    /// passing [`CandidateFilter::allows_component`] are shown; only components
    /// are interactive. Folders and dead rows are hidden.
    #[must_use]
    pub fn browse(
        &self,
        outliner: &dyn SceneOutliner,
        cx: &PickerContext<'_>,
        filter: &dyn CandidateFilter,
    ) -> Vec<BrowseEntry> {
        outliner
            .items()
            .into_iter()
            .filter_map(|item| {
                let interactive = match &item {
                    OutlinerItem::Actor(actor) => {
                        if !(cx.objects.is_alive(*actor) && filter.allows_actor(*actor)) {
                            return None;
                        }
                        false
                    }
                    OutlinerItem::Component(component) => {
                        if !(cx.objects.is_alive(*component) && filter.allows_component(*component))
                        {
                            return None;
                        }
                        true
                    }
                    OutlinerItem::Folder(_) => return None,
                };
                Some(BrowseEntry { item, interactive })
            })
            .collect()
    }
}
