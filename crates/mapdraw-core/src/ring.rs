//! Polygon ring under construction
//!
//! A [`Ring`] owns the coordinate sequence of one polygon being drawn. Once the
//! first vertex is placed the ring is always closed: its last coordinate
//! duplicates the first. At most one vertex is *floating*, tracking the pointer
//! until a click fixes it; that vertex always sits right before the closing
//! coordinate.

use tracing::debug;

use crate::geometry::{Coord, Geometry};

/// Minimum number of pairwise distinct vertices in a valid polygon
pub const MIN_DISTINCT_VERTICES: usize = 3;

/// Minimum coordinate count of a valid ring (three vertices plus the closing one)
pub const MIN_RING_COORDINATES: usize = 4;

/// Where the floating vertex of a ring is, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatingVertex {
    /// Every vertex has been fixed by a click
    #[default]
    None,
    /// The vertex at this index follows the pointer
    At(usize),
}

/// The single ring of a polygon being drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    coords: Vec<Coord>,
    floating: FloatingVertex,
}

impl Ring {
    /// Create an empty ring, before the first click
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ring from already fixed coordinates
    pub fn from_coords(coords: Vec<Coord>) -> Self {
        Self {
            coords,
            floating: FloatingVertex::None,
        }
    }

    /// Get the coordinates, closing coordinate included
    pub fn coordinates(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of coordinates, closing coordinate included
    pub fn coordinate_count(&self) -> usize {
        self.coords.len()
    }

    /// Check if no vertex has been placed yet
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Get the floating vertex state
    pub fn floating(&self) -> FloatingVertex {
        self.floating
    }

    /// Index of the closing coordinate. Callers guarantee the ring is not empty.
    fn closing_slot(&self) -> usize {
        self.coords.len() - 1
    }

    /// Move the floating vertex to `coord`, creating it if needed.
    ///
    /// A new floating vertex is inserted right before the closing coordinate.
    /// Does nothing on an empty ring: the start point comes from a click.
    pub fn insert_or_update_floating_vertex(&mut self, coord: Coord) {
        match self.floating {
            FloatingVertex::At(index) => {
                self.coords[index] = coord;
            }
            FloatingVertex::None => {
                if self.coords.is_empty() {
                    return;
                }
                let slot = self.closing_slot();
                self.coords.insert(slot, coord);
                self.floating = FloatingVertex::At(slot);
                debug!("Floating vertex inserted at {}", slot);
            }
        }
    }

    /// Fix a vertex at `coord`.
    ///
    /// The first commit seeds the ring as `[coord, coord]`. Afterwards a pending
    /// floating vertex is fixed in place at `coord`; without one, a new fixed
    /// vertex is inserted before the closing coordinate.
    pub fn commit_vertex(&mut self, coord: Coord) {
        if self.coords.is_empty() {
            self.coords = vec![coord, coord];
            self.floating = FloatingVertex::None;
            debug!("Ring started at {}", coord);
            return;
        }

        match self.floating {
            FloatingVertex::At(index) => {
                self.coords[index] = coord;
                self.floating = FloatingVertex::None;
                debug!("Floating vertex fixed at {}", index);
            }
            FloatingVertex::None => {
                let slot = self.closing_slot();
                self.coords.insert(slot, coord);
                debug!("Vertex committed at {}", slot);
            }
        }
    }

    /// Number of interior vertices fixed by a click
    pub fn fixed_interior_count(&self) -> usize {
        match self.floating {
            FloatingVertex::At(index) => index.saturating_sub(1),
            FloatingVertex::None => self.coords.len().saturating_sub(2),
        }
    }

    /// Coordinate of the most recently fixed interior vertex
    pub fn last_fixed_vertex(&self) -> Option<Coord> {
        let end = match self.floating {
            FloatingVertex::At(index) => index,
            FloatingVertex::None => self.coords.len().checked_sub(1)?,
        };
        (end > 1).then(|| self.coords[end - 1])
    }

    /// Check if a click at `coord` means "finish" rather than "add a vertex".
    ///
    /// That is a click on the last fixed vertex, or back on the start point,
    /// once at least one interior vertex has been fixed.
    pub fn is_closing_click(&self, coord: Coord) -> bool {
        match self.last_fixed_vertex() {
            Some(last) => last == coord || self.coords[0] == coord,
            None => false,
        }
    }

    /// Fix any floating vertex where it is and make sure the ring is closed
    pub fn finalize(&mut self) -> &[Coord] {
        self.floating = FloatingVertex::None;
        if let Some(&first) = self.coords.first() {
            let last = self.closing_slot();
            if last == 0 {
                self.coords.push(first);
            } else {
                self.coords[last] = first;
            }
        }
        &self.coords
    }

    /// Check if the ring is a complete polygon
    pub fn is_valid(&self) -> bool {
        is_valid_ring(&self.coords)
    }

    /// Polygon geometry holding this ring
    pub fn to_geometry(&self) -> Geometry {
        Geometry::Polygon(vec![self.coords.clone()])
    }
}

/// Check if a closed coordinate sequence forms a complete polygon.
///
/// Needs at least four coordinates, and at least three pairwise distinct ones
/// among all but the trailing closing coordinate.
pub fn is_valid_ring(coords: &[Coord]) -> bool {
    if coords.len() < MIN_RING_COORDINATES {
        return false;
    }
    distinct_count(&coords[..coords.len() - 1], MIN_DISTINCT_VERTICES) >= MIN_DISTINCT_VERTICES
}

/// Count distinct coordinates, stopping once `limit` is reached
fn distinct_count(coords: &[Coord], limit: usize) -> usize {
    let mut seen: Vec<Coord> = Vec::with_capacity(limit);
    for coord in coords {
        if !seen.contains(coord) {
            seen.push(*coord);
            if seen.len() >= limit {
                break;
            }
        }
    }
    seen.len()
}
