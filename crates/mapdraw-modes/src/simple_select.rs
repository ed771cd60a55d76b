//! Selection mode entered after drawing

use mapdraw_core::{ACTIVE_FALSE, ACTIVE_TRUE, DeleteOptions, DisplayFeature, Feature, FeatureId};
use serde_json::Value;
use tracing::info;

use crate::context::{MapClasses, ModeContext, ModeName, MouseHint};
use crate::events::{InputEvent, SubscriptionId};
use crate::mode::DrawMode;

/// Keeps a set of features selected; selecting by clicking is left to the embedder
#[derive(Debug, Default)]
pub struct SimpleSelectMode {
    selected: Vec<FeatureId>,
}

impl SimpleSelectMode {
    /// Create the mode with features to select on start
    pub fn new(selected: Vec<FeatureId>) -> Self {
        Self { selected }
    }

    /// Get the selected feature ids
    pub fn selected(&self) -> &[FeatureId] {
        &self.selected
    }
}

impl DrawMode for SimpleSelectMode {
    fn name(&self) -> ModeName {
        ModeName::SimpleSelect
    }

    fn start(&mut self, ctx: &mut ModeContext<'_>) {
        self.selected.retain(|id| ctx.store.get(*id).is_some());
        ctx.store.set_selected(&self.selected);
        ctx.ui.queue_map_classes(MapClasses {
            mouse: MouseHint::None,
        });
        if !self.selected.is_empty() {
            info!("Selected {} features", self.selected.len());
        }
    }

    fn stop(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.store.clear_selected();
    }

    fn handle_event(
        &mut self,
        _subscription: SubscriptionId,
        _event: &InputEvent,
        _ctx: &mut ModeContext<'_>,
    ) {
    }

    fn render(&self, feature: &Feature, push: &mut dyn FnMut(DisplayFeature)) {
        let active = if self.selected.contains(&feature.id) {
            ACTIVE_TRUE
        } else {
            ACTIVE_FALSE
        };
        let mut properties = feature.properties.clone();
        properties.insert("active".into(), Value::from(active));
        push(DisplayFeature::new(feature.geometry.clone(), properties));
    }

    fn trash(&mut self, ctx: &mut ModeContext<'_>) {
        if self.selected.is_empty() {
            return;
        }
        ctx.store.delete(&self.selected, DeleteOptions::default());
        info!("Deleted {} selected features", self.selected.len());
        self.selected.clear();
    }
}
