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

//! Test doubles shared by the unit tests.

use crate::store::StorageBackend;
use crate::surface::{ControlHandle, ControlSlot, ControlSpec, MapSurface, MarkerHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// What the fake surface remembers about one marker.
#[derive(Debug, Clone)]
pub struct MarkerRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
    pub style_class: Option<String>,
}

/// A [`MapSurface`] that records every call for assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    pub markers: HashMap<MarkerHandle, MarkerRecord>,
    pub controls: Vec<(ControlHandle, ControlSpec, ControlSlot)>,
    pub pans: Vec<(f64, f64, u8, Option<Duration>)>,
    pub opened_popups: Vec<MarkerHandle>,
    pub fullscreen: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of form-bearing controls currently attached.
    pub fn form_control_count(&self) -> usize {
        self.controls.iter().filter(|(_, spec, _)| spec.is_form()).count()
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(
        &mut self,
        latitude: f64,
        longitude: f64,
        popup: &str,
        style_class: Option<&str>,
    ) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(
            handle,
            MarkerRecord {
                latitude,
                longitude,
                popup: popup.to_owned(),
                style_class: style_class.map(str::to_owned),
            },
        );
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }

    fn pan_to(&mut self, latitude: f64, longitude: f64, zoom: u8, animation: Option<Duration>) {
        self.pans.push((latitude, longitude, zoom, animation));
    }

    fn open_popup(&mut self, handle: MarkerHandle) {
        self.opened_popups.push(handle);
    }

    fn attach_control(&mut self, spec: ControlSpec, slot: ControlSlot) -> ControlHandle {
        self.next_handle += 1;
        let handle = ControlHandle(self.next_handle);
        self.controls.push((handle, spec, slot));
        handle
    }

    fn detach_control(&mut self, handle: ControlHandle) {
        self.controls.retain(|(h, _, _)| *h != handle);
    }

    fn set_fullscreen(&mut self, enabled: bool) {
        self.fullscreen = enabled;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

/// Storage backend whose payload stays inspectable after the store takes
/// ownership of its clone.
#[derive(Debug, Clone, Default)]
pub struct SharedBackend {
    payload: Rc<RefCell<Option<String>>>,
}

impl SharedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }
}

impl StorageBackend for SharedBackend {
    fn read_all(&self) -> io::Result<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write_all(&mut self, payload: &str) -> io::Result<()> {
        *self.payload.borrow_mut() = Some(payload.to_owned());
        Ok(())
    }
}
