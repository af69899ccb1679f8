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

//! Canonical item collection and its persistence.
//!
//! [`ItemStore`] owns the ordered list of [`GeoItem`]s and rewrites the full
//! persisted snapshot on every mutation. Item counts are expected to be
//! small, so the full rewrite is deliberate. Absent or unparsable data is
//! treated as an empty collection, never as an error.

use crate::item::{GeoItem, Group, ItemId, ValidationError};
use log::{debug, warn};
use rand::Rng;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Upper bound (exclusive) for generated item ids.
const ID_SPACE: u64 = 1_000_000_000;

/// Group assigned to newly created items. Not user-selectable.
const NEW_ITEM_GROUP: Group = Group::Admin;

/// Synchronous key-value storage for the serialized item collection.
///
/// `read_all` returns `Ok(None)` when no snapshot exists yet.
pub trait StorageBackend {
    fn read_all(&self) -> io::Result<Option<String>>;
    fn write_all(&mut self, payload: &str) -> io::Result<()>;
}

/// File-based backend storing the snapshot as a single JSON document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read_all(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the backend with a serialized snapshot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl StorageBackend for MemoryBackend {
    fn read_all(&self) -> io::Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write_all(&mut self, payload: &str) -> io::Result<()> {
        self.payload = Some(payload.to_owned());
        Ok(())
    }
}

/// Owns the canonical, insertion-ordered collection of geo items.
pub struct ItemStore {
    items: Vec<GeoItem>,
    backend: Box<dyn StorageBackend>,
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl ItemStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            items: Vec::new(),
            backend,
        }
    }

    /// Read the persisted collection. Absent or corrupt data initializes an
    /// empty collection; nothing is surfaced to the user.
    pub fn load(&mut self) -> &[GeoItem] {
        let payload = match self.backend.read_all() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to read item snapshot: {e}");
                None
            }
        };

        self.items = match payload {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Item snapshot unparsable, starting empty: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!("Loaded {} items", self.items.len());
        &self.items
    }

    /// Validate and append a new item, persisting the full collection.
    ///
    /// The returned clone carries the freshly generated id so the caller can
    /// create the matching marker.
    pub fn add(
        &mut self,
        label: &str,
        note: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeoItem, ValidationError> {
        let id = self.fresh_id();
        let item = GeoItem::new(id, label, note, NEW_ITEM_GROUP, latitude, longitude)?;
        self.items.push(item.clone());
        self.persist();
        debug!("Added item {} ({})", item.id, item.label);
        Ok(item)
    }

    /// Remove the item with the given id. An unknown id is a no-op, not an
    /// error; the snapshot is rewritten either way.
    pub fn remove(&mut self, id: ItemId) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            debug!("Remove for unknown item {id} ignored");
        }
        self.persist();
    }

    /// Current collection in insertion (= display) order.
    pub fn items(&self) -> &[GeoItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&GeoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Random id, retried against the in-memory collection so it is unique
    /// rather than merely collision-unlikely.
    fn fresh_id(&self) -> ItemId {
        let mut rng = rand::thread_rng();
        loop {
            let id = ItemId(rng.gen_range(0..ID_SPACE));
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize item snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.write_all(&payload) {
            warn!("Failed to write item snapshot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> ItemStore {
        ItemStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_add_valid_item() {
        let mut store = memory_store();
        let item = store.add("Dock A", "pier 3", 24.45, 54.38).unwrap();
        assert_eq!(store.len(), 1);
        let found = store.get(item.id).unwrap();
        assert_eq!(found.label, "Dock A");
        assert_eq!(found.note, "pier 3");
        assert_eq!(found.group, Group::Admin);
    }

    #[test]
    fn test_add_invalid_inputs_rejected() {
        let mut store = memory_store();
        assert!(store.add("   ", "", 0.0, 0.0).is_err());
        assert!(store.add("a", "", 91.0, 0.0).is_err());
        assert!(store.add("a", "", 0.0, 181.0).is_err());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = memory_store();
        let item = store.add("Dock A", "", 1.0, 2.0).unwrap();
        store.remove(item.id);
        assert_eq!(store.len(), 0);
        store.remove(item.id);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_load_round_trip() {
        let mut store = memory_store();
        store.load();
        let a = store.add("Dock A", "", 24.45, 54.38).unwrap();
        let b = store.add("Dock B", "night", -10.0, 100.0).unwrap();

        // Simulate a fresh startup against the same snapshot.
        let snapshot = serde_json::to_string(store.items()).unwrap();
        let mut reloaded = ItemStore::new(Box::new(MemoryBackend::with_payload(snapshot)));
        reloaded.load();

        assert_eq!(reloaded.items(), &[a, b]);
    }

    #[test]
    fn test_corrupt_snapshot_recovers_empty() {
        let mut store = ItemStore::new(Box::new(MemoryBackend::with_payload("not json {")));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_absent_snapshot_is_empty() {
        let mut store = memory_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = memory_store();
        let mut ids = std::collections::HashSet::new();
        for i in 0..50 {
            let item = store.add(&format!("item {i}"), "", 0.0, 0.0).unwrap();
            assert!(ids.insert(item.id));
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = memory_store();
        store.add("first", "", 0.0, 0.0).unwrap();
        store.add("second", "", 0.0, 0.0).unwrap();
        store.add("third", "", 0.0, 0.0).unwrap();
        let labels: Vec<_> = store.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["first", "second", "third"]);
    }
}
