//! Collaborators a mode talks to
//!
//! Modes never own the store, the UI or the map. The host lends them a
//! [`ModeContext`] for the duration of each lifecycle call or event.

use mapdraw_core::{FeatureId, FeatureStore};
use serde::{Deserialize, Serialize};

use crate::events::LifecycleContext;

/// Cursor hint for the map container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseHint {
    #[default]
    None,
    /// Clicking adds a vertex
    Add,
}

impl MouseHint {
    /// Get the CSS-style class suffix for this hint
    pub fn class_name(&self) -> &'static str {
        match self {
            MouseHint::None => "none",
            MouseHint::Add => "add",
        }
    }
}

/// Classes queued on the map container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapClasses {
    pub mouse: MouseHint,
}

/// Toolbar buttons that can show as active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolButton {
    Polygon,
}

impl ToolButton {
    /// Get the button name
    pub fn name(&self) -> &'static str {
        match self {
            ToolButton::Polygon => "polygon",
        }
    }
}

/// Cosmetic UI chrome
pub trait UiController {
    /// Queue classes for the map container, applied on the next UI update
    fn queue_map_classes(&mut self, classes: MapClasses);

    /// Highlight a toolbar button, or none
    fn set_active_button(&mut self, button: Option<ToolButton>);
}

/// The host map surface
pub trait MapAdapter {
    /// Stop the map from zooming on double click
    fn disable_double_click_zoom(&mut self);

    /// Let the map zoom on double click again
    fn enable_double_click_zoom(&mut self);
}

/// Names of the modes a host can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    #[default]
    SimpleSelect,
    DrawPolygon,
}

impl ModeName {
    /// Get the mode name as used by the toolkit
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeName::SimpleSelect => "simple_select",
            ModeName::DrawPolygon => "draw_polygon",
        }
    }
}

/// Options handed to the next mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeOptions {
    /// Features the next mode should start with selected
    pub feature_ids: Vec<FeatureId>,
}

impl ModeOptions {
    /// Options preselecting the given features
    pub fn select(feature_ids: Vec<FeatureId>) -> Self {
        Self { feature_ids }
    }
}

/// The host switching modes
pub trait ModeHost {
    /// Request a switch to another mode once the current turn is handled
    fn change_mode(&mut self, name: ModeName, options: ModeOptions);
}

/// Work that must run after the current event turn completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    EnableDoubleClickZoom,
}

/// Defers tasks to the next scheduling tick
pub trait Scheduler {
    fn defer(&mut self, task: DeferredTask);
}

/// Everything a mode may touch during one call
pub struct ModeContext<'a> {
    pub store: &'a mut dyn FeatureStore,
    pub ui: &'a mut dyn UiController,
    pub map: &'a mut dyn MapAdapter,
    pub host: &'a mut dyn ModeHost,
    pub scheduler: &'a mut dyn Scheduler,
    pub lifecycle: &'a mut dyn LifecycleContext,
}

/// Mode behaviour switches taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSettings {
    /// Subscribe to keyboard shortcuts (Escape, Enter)
    pub keybindings: bool,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            keybindings: true,
        }
    }
}
