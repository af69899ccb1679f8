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

//! Geo-item data model and creation-time validation.
//!
//! A [`GeoItem`] is a labeled geographic point placed by the user. Items are
//! immutable once created; an "edit" is a delete followed by a recreate, so
//! the coordinate invariants only need to be checked here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique integer identifier for a [`GeoItem`], stable for its lifetime and
/// used as the join key to its on-screen marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Classification tag used only for marker styling.
///
/// Three groups are recognized; anything else found in persisted data lands
/// in the `Other` bucket and simply gets no style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Red,
    Blue,
    Admin,
    #[serde(other)]
    Other,
}

impl Group {
    /// Style class applied to this group's marker, if any.
    pub fn style_class(self) -> Option<&'static str> {
        match self {
            Group::Red => Some("red-group"),
            Group::Blue => Some("blue-group"),
            Group::Admin => Some("admin-group"),
            Group::Other => None,
        }
    }
}

/// Rejection reasons for item creation.
///
/// These never surface to the user; the panel layer downgrades them to a
/// logged no-op. They are typed so tests and future callers can tell the
/// cases apart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("label is empty after trimming")]
    EmptyLabel,
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// One user-placed entry on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoItem {
    pub id: ItemId,
    pub label: String,
    pub note: String,
    pub group: Group,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoItem {
    /// Build a validated item. The label is trimmed; coordinates must be in
    /// range (NaN fails both range checks).
    pub fn new(
        id: ItemId,
        label: &str,
        note: &str,
        group: Group,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            id,
            label: label.to_owned(),
            note: note.to_owned(),
            group,
            latitude,
            longitude,
        })
    }

    /// Popup text summarizing the item's fields.
    pub fn summary(&self) -> String {
        let mut text = self.label.clone();
        if !self.note.is_empty() {
            text.push_str("\nNote: ");
            text.push_str(&self.note);
        }
        text.push_str(&format!("\nLat: {}\nLng: {}", self.latitude, self.longitude));
        text
    }
}
