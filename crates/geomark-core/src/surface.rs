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

//! The seam between the core and the map renderer.
//!
//! [`MapSurface`] is the contract an actual map implementation (tiles,
//! painting, input) provides to the core: create and remove markers, pan the
//! view, open popups, and host panel controls in its control slots. The core
//! never touches rendering directly; it only holds the opaque handles minted
//! here.

use crate::item::{GeoItem, ItemId};
use std::time::Duration;

/// Opaque token for an on-screen marker, minted by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque token for an attached panel control, minted by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub u64);

/// Where a control is mounted on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSlot {
    TopLeft,
    TopRight,
}

/// Always-present toolbar actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    Add,
    List,
    Delete,
    Fullscreen,
}

/// Row snapshot for the list and delete forms. Carries everything the
/// renderer needs so it never reaches back into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: ItemId,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&GeoItem> for ItemRow {
    fn from(item: &GeoItem) -> Self {
        Self {
            id: item.id,
            label: item.label.clone(),
            latitude: item.latitude,
            longitude: item.longitude,
        }
    }
}

/// Parameterized description of a panel control.
///
/// One variant per panel state; each carries the data snapshot it is
/// rendered from, taken at attach time.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlSpec {
    Toolbar(ToolbarButton),
    AddForm,
    ListForm(Vec<ItemRow>),
    DeleteList(Vec<ItemRow>),
    ConfirmDelete { id: ItemId, label: String },
}

impl ControlSpec {
    /// True for the form-bearing controls; at most one of these may be
    /// attached at any instant.
    pub fn is_form(&self) -> bool {
        !matches!(self, ControlSpec::Toolbar(_))
    }
}

/// Contract the map renderer fulfills for the core.
pub trait MapSurface {
    /// Create a marker with the given popup text and optional style class,
    /// returning its handle.
    fn add_marker(
        &mut self,
        latitude: f64,
        longitude: f64,
        popup: &str,
        style_class: Option<&str>,
    ) -> MarkerHandle;

    /// Remove a marker. Stale handles must be tolerated silently.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Pan (and zoom) the view, optionally animated over a bounded duration.
    fn pan_to(&mut self, latitude: f64, longitude: f64, zoom: u8, animation: Option<Duration>);

    /// Open the popup bound to a marker.
    fn open_popup(&mut self, handle: MarkerHandle);

    /// Mount a control in a slot, returning its handle.
    fn attach_control(&mut self, spec: ControlSpec, slot: ControlSlot) -> ControlHandle;

    /// Unmount a previously attached control. Stale handles must be
    /// tolerated silently.
    fn detach_control(&mut self, handle: ControlHandle);

    fn set_fullscreen(&mut self, enabled: bool);

    fn is_fullscreen(&self) -> bool;
}
