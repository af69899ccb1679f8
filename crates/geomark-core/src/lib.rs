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

//! Core of the Geomark map application: the geo-item lifecycle, the marker
//! registry, and the single-active-panel state machine.
//!
//! The layers can be used independently or composed:
//!
//! - **Item layer** ([`item`]): the [`GeoItem`] data model and its
//!   creation-time validation.
//! - **Store layer** ([`store`]): the canonical ordered collection with
//!   synchronous snapshot persistence behind the [`StorageBackend`] seam.
//! - **Marker layer** ([`markers`]): the `id -> marker handle` registry
//!   driving the map surface.
//! - **Panel layer** ([`panel`]): the state machine wiring user events to
//!   store and registry operations.
//!
//! Rendering, input, and storage media stay outside this crate: a frontend
//! implements [`MapSurface`] and picks a [`StorageBackend`].
//!
//! # Quick start
//!
//! ```
//! use geomark_core::{ItemStore, MemoryBackend};
//!
//! let mut store = ItemStore::new(Box::new(MemoryBackend::new()));
//! store.load();
//!
//! let item = store.add("Dock A", "pier 3", 24.45, 54.38).unwrap();
//! assert!(store.get(item.id).is_some());
//!
//! // Out-of-range coordinates never create an item.
//! assert!(store.add("Dock B", "", 95.0, 54.38).is_err());
//! assert_eq!(store.len(), 1);
//! ```

pub mod item;
pub mod markers;
pub mod panel;
pub mod store;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use item::{GeoItem, Group, ItemId, ValidationError};
pub use markers::{MarkerRegistry, FOCUS_PAN_DURATION, FOCUS_ZOOM};
pub use panel::{AddDraft, PanelController, PanelEvent, PanelState};
pub use store::{FileBackend, ItemStore, MemoryBackend, StorageBackend};
pub use surface::{
    ControlHandle, ControlSlot, ControlSpec, ItemRow, MapSurface, MarkerHandle, ToolbarButton,
};
