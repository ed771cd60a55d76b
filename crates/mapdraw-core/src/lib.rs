//! Mapdraw Core Data Structures
//!
//! This crate contains the data model shared by every drawing mode:
//! - Geometry: GeoJSON-shaped point, line and polygon geometries
//! - Feature: identified geometry with caller-supplied properties
//! - Ring: the in-progress polygon ring and its validity check
//! - Store: the feature store collaborator and an in-memory implementation

pub mod feature;
pub mod geometry;
pub mod ring;
pub mod store;

pub use feature::*;
pub use geometry::*;
pub use ring::*;
pub use store::*;
