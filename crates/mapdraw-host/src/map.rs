//! Map surface adapters

use std::sync::Arc;

use mapdraw_modes::MapAdapter;
use parking_lot::Mutex;
use tracing::debug;

/// Interaction state of a map surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapState {
    /// Whether double click zooms the map
    pub double_click_zoom: bool,
    /// How many times double click zoom was disabled
    pub disable_count: usize,
    /// How many times double click zoom was enabled
    pub enable_count: usize,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            double_click_zoom: true,
            disable_count: 0,
            enable_count: 0,
        }
    }
}

/// Map state shared between the draw controller and the embedder
pub type SharedMapState = Arc<Mutex<MapState>>;

/// A map without a renderer, tracking only the interaction switches
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    state: SharedMapState,
}

impl HeadlessMap {
    /// Create a map with double click zoom enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle to the map state
    pub fn state(&self) -> SharedMapState {
        Arc::clone(&self.state)
    }
}

impl MapAdapter for HeadlessMap {
    fn disable_double_click_zoom(&mut self) {
        let mut state = self.state.lock();
        state.double_click_zoom = false;
        state.disable_count += 1;
        debug!("Double click zoom disabled");
    }

    fn enable_double_click_zoom(&mut self) {
        let mut state = self.state.lock();
        state.double_click_zoom = true;
        state.enable_count += 1;
        debug!("Double click zoom enabled");
    }
}
