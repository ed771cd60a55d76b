//! Geometry definitions

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A map coordinate, `x` is longitude and `y` is latitude
pub type Coord = DVec2;

/// Geometry of a feature, serialized the GeoJSON way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position
    Point(Coord),
    /// An open polyline
    LineString(Vec<Coord>),
    /// Linear rings, the first one is the outer boundary
    Polygon(Vec<Vec<Coord>>),
}

/// Kind of a geometry without its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// Get the GeoJSON type name
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

impl Geometry {
    /// A polygon with a single empty ring, the shape of a polygon before its first click
    pub fn empty_polygon() -> Self {
        Geometry::Polygon(vec![Vec::new()])
    }

    /// Get the kind of this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Outer ring of a polygon, `None` for other geometries
    pub fn outer_ring(&self) -> Option<&[Coord]> {
        match self {
            Geometry::Polygon(rings) => Some(rings.first().map(Vec::as_slice).unwrap_or(&[])),
            _ => None,
        }
    }

    /// Check if the geometry has no coordinates to draw
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(coords) => coords.is_empty(),
            Geometry::Polygon(rings) => rings.iter().all(Vec::is_empty),
        }
    }
}
