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

//! Live mapping from item identity to on-screen marker handles.
//!
//! [`MarkerRegistry`] is the only place holding the `id -> handle`
//! association. The handles themselves are owned by the [`MapSurface`]; the
//! registry just remembers which one belongs to which item so delete and
//! focus can find them again.

use crate::item::{GeoItem, ItemId};
use crate::surface::{MapSurface, MarkerHandle};
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Duration;

/// Zoom level used when focusing an item from the list.
pub const FOCUS_ZOOM: u8 = 7;

/// Upper bound on the focus pan animation.
pub const FOCUS_PAN_DURATION: Duration = Duration::from_secs(1);

/// Tracks one marker handle per live item id.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    handles: HashMap<ItemId, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the marker for an item and record the association.
    ///
    /// Calling this twice for the same id without an intervening
    /// [`hide`](Self::hide) would leak a duplicate marker, so a repeat call
    /// is refused and logged.
    pub fn show(&mut self, item: &GeoItem, surface: &mut dyn MapSurface) {
        if self.handles.contains_key(&item.id) {
            warn!("Marker for item {} already shown, ignoring", item.id);
            return;
        }
        let handle = surface.add_marker(
            item.latitude,
            item.longitude,
            &item.summary(),
            item.group.style_class(),
        );
        self.handles.insert(item.id, handle);
        debug!("Marker shown for item {}", item.id);
    }

    /// Create markers for every item in collection order. Used once at
    /// startup after the store load.
    pub fn show_all(&mut self, items: &[GeoItem], surface: &mut dyn MapSurface) {
        for item in items {
            self.show(item, surface);
        }
    }

    /// Remove an item's marker and drop the association. Unknown ids are a
    /// no-op.
    pub fn hide(&mut self, id: ItemId, surface: &mut dyn MapSurface) {
        let Some(handle) = self.handles.remove(&id) else {
            return;
        };
        surface.remove_marker(handle);
        debug!("Marker hidden for item {id}");
    }

    /// Open an item's popup and pan to the coordinate with a short bounded
    /// animation. Unknown ids are a no-op.
    pub fn focus(&self, id: ItemId, latitude: f64, longitude: f64, surface: &mut dyn MapSurface) {
        let Some(&handle) = self.handles.get(&id) else {
            return;
        };
        surface.open_popup(handle);
        surface.pan_to(latitude, longitude, FOCUS_ZOOM, Some(FOCUS_PAN_DURATION));
    }

    /// Ids with an active marker, in no particular order.
    pub fn marker_ids(&self) -> Vec<ItemId> {
        self.handles.keys().copied().collect()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
