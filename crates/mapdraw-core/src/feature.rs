//! Feature definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::geometry::Geometry;

/// Caller-supplied feature properties
pub type Properties = serde_json::Map<String, Value>;

/// Opaque identity of a stored feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(Uuid);

impl FeatureId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored feature: identity, geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub id: FeatureId,
    #[serde(default)]
    pub properties: Properties,
    pub geometry: Geometry,
}

impl Feature {
    /// Create a feature with a fresh id and no properties
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: FeatureId::new(),
            properties: Properties::new(),
            geometry,
        }
    }

    /// Create a polygon feature with one empty ring
    pub fn empty_polygon() -> Self {
        Self::new(Geometry::empty_polygon())
    }

    /// Replace the properties of this feature
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Use a specific id
    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = id;
        self
    }
}

/// A collection of features, as returned to the embedding application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of features in the collection
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Value of the `active` display property
pub const ACTIVE_TRUE: &str = "true";
/// Value of the `active` display property
pub const ACTIVE_FALSE: &str = "false";
/// Value of the `meta` display property for the feature being drawn
pub const META_FEATURE: &str = "feature";

/// A record handed to the map renderer.
///
/// Display records carry no identity of their own; anything the renderer needs
/// to know about the source feature travels in `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct DisplayFeature {
    pub properties: Properties,
    pub geometry: Geometry,
}

impl DisplayFeature {
    /// Create a display record from a geometry and its tagged properties
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            properties,
            geometry,
        }
    }

    /// Get a string property
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Whether this record is tagged as the active feature
    pub fn is_active(&self) -> bool {
        self.property_str("active") == Some(ACTIVE_TRUE)
    }
}
