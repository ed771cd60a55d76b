//! UI chrome state

use mapdraw_modes::{MapClasses, ToolButton, UiController};

/// Map container classes and toolbar highlight, as the embedder should show them
#[derive(Debug, Clone, Default)]
pub struct UiState {
    queued: Option<MapClasses>,
    map_classes: MapClasses,
    active_button: Option<ToolButton>,
}

impl UiState {
    /// Create the default UI state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply queued map classes
    pub fn update_map_classes(&mut self) {
        if let Some(classes) = self.queued.take() {
            self.map_classes = classes;
        }
    }

    /// Get the applied map classes
    pub fn map_classes(&self) -> MapClasses {
        self.map_classes
    }

    /// Class name for the map container cursor
    pub fn mouse_class(&self) -> String {
        format!("mouse-{}", self.map_classes.mouse.class_name())
    }

    /// Get the highlighted toolbar button
    pub fn active_button(&self) -> Option<ToolButton> {
        self.active_button
    }
}

impl UiController for UiState {
    fn queue_map_classes(&mut self, classes: MapClasses) {
        self.queued = Some(classes);
    }

    fn set_active_button(&mut self, button: Option<ToolButton>) {
        self.active_button = button;
    }
}
