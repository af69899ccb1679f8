// Copyright 2025 The Geomark Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single-active-panel state machine.
//!
//! [`PanelController`] owns the item store and marker registry and drives
//! which UI form is mounted on the map surface. Exactly one state is active
//! at a time; entering a state first detaches every control belonging to the
//! previous one, so at most one form-bearing control is ever attached.
//!
//! All transitions are explicit method calls on user events; there are no
//! ambient globals and no side-effecting closures. Events arriving in a
//! state that does not handle them are ignored and logged at debug level.

use crate::item::ItemId;
use crate::markers::MarkerRegistry;
use crate::store::ItemStore;
use crate::surface::{ControlHandle, ControlSlot, ControlSpec, ItemRow, MapSurface, ToolbarButton};
use log::{debug, warn};

/// Which form the panel is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Toolbar only.
    Default,
    AddForm,
    ListForm,
    DeleteList,
    /// Confirmation dialog for one item picked from the delete list.
    ConfirmDelete(ItemId),
}

/// User-driven events routed into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    OpenAddForm,
    OpenListForm,
    OpenDeleteList,
    /// Submit the add form with the current draft fields.
    SubmitAdd,
    /// A row in the list or delete form was clicked.
    RowClicked(ItemId),
    /// "Yes" in the confirm-delete dialog.
    ConfirmYes,
    /// Cancel/back in whichever form is open.
    Cancel,
    /// The map itself was clicked at a coordinate.
    MapClicked { latitude: f64, longitude: f64 },
    ToggleFullscreen,
}

/// Text fields of the add form. Owned by the controller so a map click can
/// fill the coordinate fields whether or not the form is visible yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddDraft {
    pub label: String,
    pub note: String,
    pub latitude: String,
    pub longitude: String,
}

/// State machine wiring panel events to store and registry operations.
pub struct PanelController {
    store: ItemStore,
    registry: MarkerRegistry,
    state: PanelState,
    controls: Vec<ControlHandle>,
    draft: AddDraft,
    highlighted: Option<ItemId>,
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("state", &self.state)
            .field("controls", &self.controls)
            .field("highlighted", &self.highlighted)
            .finish_non_exhaustive()
    }
}

impl PanelController {
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            registry: MarkerRegistry::new(),
            state: PanelState::Default,
            controls: Vec::new(),
            draft: AddDraft::default(),
            highlighted: None,
        }
    }

    /// Load persisted items, show their markers, and mount the permanent
    /// fullscreen control plus the default toolbar.
    pub fn startup(&mut self, surface: &mut dyn MapSurface) {
        let items = self.store.load().to_vec();
        self.registry.show_all(&items, surface);
        // The fullscreen button outlives every panel transition, so it is
        // not tracked in the teardown set.
        surface.attach_control(
            ControlSpec::Toolbar(ToolbarButton::Fullscreen),
            ControlSlot::TopLeft,
        );
        self.enter(PanelState::Default, surface);
    }

    /// Route one user event through the state machine.
    pub fn handle(&mut self, event: PanelEvent, surface: &mut dyn MapSurface) {
        match (self.state, event) {
            // Independent of panel state: remember the clicked coordinate in
            // the draft fields for whenever the add form is (or becomes)
            // visible.
            (_, PanelEvent::MapClicked { latitude, longitude }) => {
                self.draft.latitude = latitude.to_string();
                self.draft.longitude = longitude.to_string();
            }
            (_, PanelEvent::ToggleFullscreen) => {
                let enabled = !surface.is_fullscreen();
                surface.set_fullscreen(enabled);
            }
            (PanelState::Default, PanelEvent::OpenAddForm) => {
                self.enter(PanelState::AddForm, surface);
            }
            (PanelState::Default, PanelEvent::OpenListForm) => {
                self.enter(PanelState::ListForm, surface);
            }
            (PanelState::Default, PanelEvent::OpenDeleteList) => {
                self.enter(PanelState::DeleteList, surface);
            }
            (PanelState::AddForm, PanelEvent::SubmitAdd) => {
                self.submit_add(surface);
            }
            (
                PanelState::AddForm | PanelState::ListForm | PanelState::DeleteList,
                PanelEvent::Cancel,
            ) => {
                self.enter(PanelState::Default, surface);
            }
            (PanelState::ListForm, PanelEvent::RowClicked(id)) => {
                self.focus_item(id, surface);
                // One highlight at a time; selecting a new row clears the
                // previous one.
                self.highlighted = Some(id);
            }
            (PanelState::DeleteList, PanelEvent::RowClicked(id)) => {
                self.focus_item(id, surface);
                if self.store.get(id).is_some() {
                    self.enter(PanelState::ConfirmDelete(id), surface);
                }
            }
            (PanelState::ConfirmDelete(id), PanelEvent::ConfirmYes) => {
                self.store.remove(id);
                self.registry.hide(id, surface);
                self.enter(PanelState::DeleteList, surface);
            }
            (PanelState::ConfirmDelete(_), PanelEvent::Cancel) => {
                self.enter(PanelState::DeleteList, surface);
            }
            (state, event) => {
                debug!("Ignoring {event:?} in {state:?}");
            }
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn draft(&self) -> &AddDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AddDraft {
        &mut self.draft
    }

    /// Currently highlighted list row, if any.
    pub fn highlighted(&self) -> Option<ItemId> {
        self.highlighted
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    /// Tear down the previous state's controls, then mount the next state's.
    fn enter(&mut self, next: PanelState, surface: &mut dyn MapSurface) {
        for handle in self.controls.drain(..) {
            surface.detach_control(handle);
        }
        match next {
            PanelState::Default => {
                for button in [ToolbarButton::Add, ToolbarButton::List, ToolbarButton::Delete] {
                    let handle =
                        surface.attach_control(ControlSpec::Toolbar(button), ControlSlot::TopRight);
                    self.controls.push(handle);
                }
            }
            PanelState::AddForm => {
                let handle = surface.attach_control(ControlSpec::AddForm, ControlSlot::TopRight);
                self.controls.push(handle);
            }
            PanelState::ListForm => {
                self.highlighted = None;
                let handle = surface
                    .attach_control(ControlSpec::ListForm(self.rows()), ControlSlot::TopRight);
                self.controls.push(handle);
            }
            PanelState::DeleteList => {
                let handle = surface
                    .attach_control(ControlSpec::DeleteList(self.rows()), ControlSlot::TopRight);
                self.controls.push(handle);
            }
            PanelState::ConfirmDelete(id) => {
                let label = self
                    .store
                    .get(id)
                    .map(|item| item.label.clone())
                    .unwrap_or_default();
                let handle = surface.attach_control(
                    ControlSpec::ConfirmDelete { id, label },
                    ControlSlot::TopRight,
                );
                self.controls.push(handle);
            }
        }
        self.state = next;
    }

    fn rows(&self) -> Vec<ItemRow> {
        self.store.items().iter().map(ItemRow::from).collect()
    }

    fn focus_item(&mut self, id: ItemId, surface: &mut dyn MapSurface) {
        if let Some(item) = self.store.get(id) {
            self.registry
                .focus(id, item.latitude, item.longitude, surface);
        }
    }

    fn submit_add(&mut self, surface: &mut dyn MapSurface) {
        let Ok(latitude) = self.draft.latitude.trim().parse::<f64>() else {
            warn!("Add rejected: latitude field {:?} not numeric", self.draft.latitude);
            return;
        };
        let Ok(longitude) = self.draft.longitude.trim().parse::<f64>() else {
            warn!("Add rejected: longitude field {:?} not numeric", self.draft.longitude);
            return;
        };
        match self
            .store
            .add(&self.draft.label, &self.draft.note, latitude, longitude)
        {
            Ok(item) => {
                self.registry.show(&item, surface);
                self.draft = AddDraft::default();
                self.enter(PanelState::Default, surface);
            }
            // Silent by design: the form stays up and nothing is created.
            Err(e) => warn!("Add rejected: {e}"),
        }
    }
}
