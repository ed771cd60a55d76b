//! Feature store
//!
//! The store owns every feature known to the editor. Drawing modes only hold
//! feature ids and go through [`FeatureStore`] to change them.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

use crate::feature::{Feature, FeatureCollection, FeatureId};
use crate::geometry::Geometry;

/// Store-related errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Feature not found: {0}")]
    FeatureNotFound(FeatureId),
}

/// Options for [`FeatureStore::delete`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Suppress the user-visible change notification
    pub silent: bool,
}

impl DeleteOptions {
    /// Delete without notifying the user
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// Notifications the store emits to the embedding application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Features were deleted
    Deleted { ids: Vec<FeatureId> },
}

/// Feature storage consumed by drawing modes
pub trait FeatureStore {
    /// Register a feature and return its id
    fn add(&mut self, feature: Feature) -> FeatureId;

    /// Delete features; unknown ids are ignored
    fn delete(&mut self, ids: &[FeatureId], options: DeleteOptions);

    /// Mark a feature as changed so it gets redrawn
    fn feature_changed(&mut self, id: FeatureId);

    /// Clear the current selection
    fn clear_selected(&mut self);

    /// Replace the selection
    fn set_selected(&mut self, ids: &[FeatureId]);

    /// Check if a feature is selected
    fn is_selected(&self, id: FeatureId) -> bool;

    /// Get a feature by id
    fn get(&self, id: FeatureId) -> Option<&Feature>;

    /// Replace the geometry of a stored feature
    fn set_geometry(&mut self, id: FeatureId, geometry: Geometry) -> Result<(), StoreError>;
}

/// In-memory feature store keeping insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    features: HashMap<FeatureId, Feature>,
    order: Vec<FeatureId>,
    selected: Vec<FeatureId>,
    changed: HashSet<FeatureId>,
    events: Vec<StoreEvent>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored features
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get all feature ids in insertion order
    pub fn ids(&self) -> &[FeatureId] {
        &self.order
    }

    /// Iterate over features in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.order.iter().filter_map(|id| self.features.get(id))
    }

    /// Get a feature, failing if it does not exist
    pub fn require(&self, id: FeatureId) -> Result<&Feature, StoreError> {
        self.features.get(&id).ok_or(StoreError::FeatureNotFound(id))
    }

    /// Get the selected feature ids
    pub fn selected(&self) -> &[FeatureId] {
        &self.selected
    }

    /// Snapshot of all features as a collection
    pub fn to_collection(&self) -> FeatureCollection {
        FeatureCollection {
            features: self.iter().cloned().collect(),
        }
    }

    /// Take the ids changed since the last call
    pub fn take_changed(&mut self) -> HashSet<FeatureId> {
        std::mem::take(&mut self.changed)
    }

    /// Take the notifications emitted since the last call
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Delete every feature
    pub fn clear(&mut self) {
        let ids = self.order.clone();
        self.delete(&ids, DeleteOptions::default());
    }
}

impl FeatureStore for MemoryStore {
    fn add(&mut self, feature: Feature) -> FeatureId {
        let id = feature.id;
        if self.features.insert(id, feature).is_none() {
            self.order.push(id);
        }
        self.changed.insert(id);
        id
    }

    fn delete(&mut self, ids: &[FeatureId], options: DeleteOptions) {
        let mut deleted = Vec::new();
        for id in ids {
            if self.features.remove(id).is_some() {
                deleted.push(*id);
            } else {
                warn!("Tried to delete unknown feature: {}", id);
            }
        }
        if deleted.is_empty() {
            return;
        }

        self.order.retain(|id| !deleted.contains(id));
        self.selected.retain(|id| !deleted.contains(id));
        for id in &deleted {
            self.changed.remove(id);
        }

        if !options.silent {
            self.events.push(StoreEvent::Deleted { ids: deleted });
        }
    }

    fn feature_changed(&mut self, id: FeatureId) {
        if self.features.contains_key(&id) {
            self.changed.insert(id);
        }
    }

    fn clear_selected(&mut self) {
        self.selected.clear();
    }

    fn set_selected(&mut self, ids: &[FeatureId]) {
        self.selected.clear();
        for id in ids {
            if self.features.contains_key(id) && !self.selected.contains(id) {
                self.selected.push(*id);
            }
        }
    }

    fn is_selected(&self, id: FeatureId) -> bool {
        self.selected.contains(&id)
    }

    fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    fn set_geometry(&mut self, id: FeatureId, geometry: Geometry) -> Result<(), StoreError> {
        let feature = self
            .features
            .get_mut(&id)
            .ok_or(StoreError::FeatureNotFound(id))?;
        feature.geometry = geometry;
        Ok(())
    }
}
