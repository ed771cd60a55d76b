//! Draw controller
//!
//! [`Draw`] owns the feature store, the subscription registry, the UI state
//! and the map adapter, and runs one mode at a time. Every public entry point
//! is one scheduling turn: the mode reacts, a mode switch it requested is
//! applied, then deferred tasks run.

use std::collections::VecDeque;

use mapdraw_core::{DisplayFeature, Feature, FeatureCollection, FeatureId, MemoryStore, StoreEvent};
use mapdraw_modes::{
    DeferredTask, DrawMode, EventBus, InputEvent, MapAdapter, Mode, ModeContext, ModeHost,
    ModeName, ModeOptions, ModeSettings, Scheduler,
};
use tracing::{info, warn};

use crate::config::DrawConfig;
use crate::ui::UiState;

/// Upper bound on mode switches chained within one turn
const MAX_CHAINED_MODE_CHANGES: usize = 8;

/// Mode switch requested during the current turn
#[derive(Debug, Default)]
struct PendingModeChange {
    request: Option<(ModeName, ModeOptions)>,
}

impl PendingModeChange {
    fn is_requested(&self) -> bool {
        self.request.is_some()
    }

    fn take(&mut self) -> Option<(ModeName, ModeOptions)> {
        self.request.take()
    }
}

impl ModeHost for PendingModeChange {
    fn change_mode(&mut self, name: ModeName, options: ModeOptions) {
        if let Some((previous, _)) = &self.request {
            warn!(
                "Mode change to {} replaced by {}",
                previous.as_str(),
                name.as_str()
            );
        }
        self.request = Some((name, options));
    }
}

/// Tasks waiting for the end of the current turn
#[derive(Debug, Default)]
struct TaskQueue {
    tasks: VecDeque<DeferredTask>,
}

impl Scheduler for TaskQueue {
    fn defer(&mut self, task: DeferredTask) {
        self.tasks.push_back(task);
    }
}

/// Everything lent to the active mode
struct Collaborators {
    store: MemoryStore,
    bus: EventBus,
    ui: UiState,
    map: Box<dyn MapAdapter>,
    pending: PendingModeChange,
    deferred: TaskQueue,
}

impl Collaborators {
    fn context(&mut self) -> ModeContext<'_> {
        ModeContext {
            store: &mut self.store,
            ui: &mut self.ui,
            map: self.map.as_mut(),
            host: &mut self.pending,
            scheduler: &mut self.deferred,
            lifecycle: &mut self.bus,
        }
    }
}

/// The drawing controller an application embeds
pub struct Draw {
    collaborators: Collaborators,
    mode: Mode,
    settings: ModeSettings,
}

impl Draw {
    /// Create a controller over a map and start the configured default mode
    pub fn new(map: Box<dyn MapAdapter>, config: &DrawConfig) -> Self {
        let settings = config.mode_settings();
        let mut draw = Self {
            collaborators: Collaborators {
                store: MemoryStore::new(),
                bus: EventBus::new(),
                ui: UiState::new(),
                map,
                pending: PendingModeChange::default(),
                deferred: TaskQueue::default(),
            },
            mode: Mode::create(config.default_mode, settings, ModeOptions::default()),
            settings,
        };

        draw.mode.start(&mut draw.collaborators.context());
        draw.settle();
        info!("Draw started in {} mode", draw.mode.name().as_str());
        draw
    }

    /// Switch to another mode
    pub fn change_mode(&mut self, name: ModeName, options: ModeOptions) {
        self.switch_mode(name, options);
        self.settle();
    }

    /// Deliver one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        for id in self.collaborators.bus.matching(&event) {
            // Once a handler asks to leave the mode, the rest of the turn is not its to handle
            if self.collaborators.pending.is_requested() {
                break;
            }
            if !self.collaborators.bus.is_live(id) {
                continue;
            }
            self.mode
                .handle_event(id, &event, &mut self.collaborators.context());
        }
        self.settle();
    }

    /// Delete whatever the active mode is working on
    pub fn trash(&mut self) {
        self.mode.trash(&mut self.collaborators.context());
        self.settle();
    }

    /// Delete every feature, leaving any drawing mode first
    pub fn delete_all(&mut self) {
        if self.mode.name() != ModeName::SimpleSelect {
            self.switch_mode(ModeName::SimpleSelect, ModeOptions::default());
        }
        self.collaborators.store.clear();
        self.settle();
    }

    /// Get all features
    pub fn get_all(&self) -> FeatureCollection {
        self.collaborators.store.to_collection()
    }

    /// Get a feature by id
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        mapdraw_core::FeatureStore::get(&self.collaborators.store, id)
    }

    /// Display records for every feature, as the active mode renders them
    pub fn render(&self) -> Vec<DisplayFeature> {
        let mut records = Vec::new();
        for feature in self.collaborators.store.iter() {
            self.mode.render(feature, &mut |display| records.push(display));
        }
        records
    }

    /// Get the active mode
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Get the name of the active mode
    pub fn mode_name(&self) -> ModeName {
        self.mode.name()
    }

    /// Get the selected feature ids
    pub fn selected(&self) -> &[FeatureId] {
        self.collaborators.store.selected()
    }

    /// Get the UI state
    pub fn ui(&self) -> &UiState {
        &self.collaborators.ui
    }

    /// Take the store notifications emitted since the last call
    pub fn drain_store_events(&mut self) -> Vec<StoreEvent> {
        self.collaborators.store.drain_events()
    }

    fn switch_mode(&mut self, name: ModeName, options: ModeOptions) {
        let mut ctx = self.collaborators.context();
        self.mode.stop(&mut ctx);
        self.mode = Mode::create(name, self.settings, options);
        self.mode.start(&mut ctx);
        info!("Switched to {} mode", name.as_str());
    }

    /// End the current turn: apply requested mode switches, then run deferred work
    fn settle(&mut self) {
        for _ in 0..MAX_CHAINED_MODE_CHANGES {
            let Some((name, options)) = self.collaborators.pending.take() else {
                break;
            };
            self.switch_mode(name, options);
        }
        if let Some((name, _)) = self.collaborators.pending.take() {
            warn!("Dropped mode change to {}, too many switches in one turn", name.as_str());
        }

        self.collaborators.ui.update_map_classes();

        while let Some(task) = self.collaborators.deferred.tasks.pop_front() {
            match task {
                DeferredTask::EnableDoubleClickZoom => {
                    self.collaborators.map.enable_double_click_zoom();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use mapdraw_core::{Coord, Geometry};
    use mapdraw_modes::{DrawState, KeyCode, MouseHint, ToolButton};

    use super::*;
    use crate::map::{HeadlessMap, SharedMapState};

    fn c(x: f64, y: f64) -> Coord {
        DVec2::new(x, y)
    }

    fn new_draw() -> (Draw, SharedMapState) {
        let map = HeadlessMap::new();
        let state = map.state();
        (Draw::new(Box::new(map), &DrawConfig::new()), state)
    }

    fn click(draw: &mut Draw, x: f64, y: f64) {
        draw.handle_event(InputEvent::click(x, y));
    }

    fn only_ring(draw: &Draw) -> Vec<Coord> {
        let all = draw.get_all();
        assert_eq!(all.len(), 1, "expected a single feature");
        match &all.features[0].geometry {
            Geometry::Polygon(rings) => rings[0].clone(),
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_in_simple_select() {
        let (draw, map) = new_draw();
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);
        assert!(draw.get_all().is_empty());
        assert!(map.lock().double_click_zoom);
    }

    #[test]
    fn test_entering_draw_polygon() {
        let (mut draw, map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());

        assert_eq!(draw.mode_name(), ModeName::DrawPolygon);
        assert_eq!(draw.get_all().len(), 1);
        assert_eq!(draw.get_all().features[0].geometry, Geometry::empty_polygon());
        assert_eq!(draw.ui().active_button(), Some(ToolButton::Polygon));
        assert_eq!(draw.ui().map_classes().mouse, MouseHint::Add);
        assert!(!map.lock().double_click_zoom);
    }

    #[test]
    fn test_interaction_sequence() {
        let (mut draw, map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());

        // first click
        click(&mut draw, 10.0, 20.0);
        assert_eq!(only_ring(&draw), vec![c(10.0, 20.0), c(10.0, 20.0)]);

        // move mouse
        draw.handle_event(InputEvent::mouse_move(15.0, 23.0));
        assert_eq!(
            only_ring(&draw),
            vec![c(10.0, 20.0), c(15.0, 23.0), c(10.0, 20.0)]
        );

        // move mouse again
        draw.handle_event(InputEvent::mouse_move(30.0, 33.0));
        assert_eq!(
            only_ring(&draw),
            vec![c(10.0, 20.0), c(30.0, 33.0), c(10.0, 20.0)]
        );

        // click to fix the previewed vertex
        click(&mut draw, 35.0, 35.0);
        assert_eq!(
            only_ring(&draw),
            vec![c(10.0, 20.0), c(35.0, 35.0), c(10.0, 20.0)]
        );

        // add more points then click on the last vertex to finish
        click(&mut draw, 40.0, 40.0);
        click(&mut draw, 50.0, 50.0);
        click(&mut draw, 55.0, 55.0);
        click(&mut draw, 55.0, 55.0);

        let expected = vec![
            c(10.0, 20.0),
            c(35.0, 35.0),
            c(40.0, 40.0),
            c(50.0, 50.0),
            c(55.0, 55.0),
            c(10.0, 20.0),
        ];
        assert_eq!(only_ring(&draw), expected);
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);

        let id = draw.get_all().features[0].id;
        assert_eq!(draw.selected(), &[id]);
        assert_eq!(draw.ui().active_button(), None);
        {
            let map = map.lock();
            assert!(map.double_click_zoom);
            assert_eq!(map.enable_count, 1);
        }

        // drawing has ended, another click does not add a coordinate
        click(&mut draw, 40.0, 40.0);
        assert_eq!(only_ring(&draw), expected);
    }

    #[test]
    fn test_trash_before_completion() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 1.0, 1.0);
        click(&mut draw, 2.0, 2.0);
        click(&mut draw, 3.0, 3.0);
        assert_eq!(
            only_ring(&draw),
            vec![c(1.0, 1.0), c(2.0, 2.0), c(3.0, 3.0), c(1.0, 1.0)]
        );

        draw.trash();
        assert!(draw.get_all().is_empty(), "no feature added");
        assert!(draw.drain_store_events().is_empty());

        click(&mut draw, 1.0, 1.0);
        assert!(draw.get_all().is_empty(), "no longer drawing");
    }

    #[test]
    fn test_escape_before_completion() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 1.0, 1.0);
        click(&mut draw, 2.0, 2.0);
        click(&mut draw, 3.0, 3.0);

        draw.handle_event(InputEvent::key_up(KeyCode::from_code(27)));
        assert!(draw.get_all().is_empty(), "no feature added");
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);

        click(&mut draw, 1.0, 1.0);
        assert!(draw.get_all().is_empty(), "no longer drawing");
    }

    #[test]
    fn test_escape_hands_over_to_select_when_drawing_by_default() {
        let config = DrawConfig {
            default_mode: ModeName::DrawPolygon,
            ..DrawConfig::new()
        };
        let mut draw = Draw::new(Box::new(HeadlessMap::new()), &config);
        click(&mut draw, 1.0, 1.0);
        click(&mut draw, 2.0, 2.0);
        click(&mut draw, 3.0, 3.0);

        draw.handle_event(InputEvent::key_up(KeyCode::Escape));
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);
        assert!(draw.get_all().is_empty());

        click(&mut draw, 1.0, 1.0);
        assert!(draw.get_all().is_empty(), "no new drawing started");
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);
    }

    #[test]
    fn test_enter_finishes() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 1.0, 1.0);
        click(&mut draw, 2.0, 2.0);
        click(&mut draw, 3.0, 3.0);

        draw.handle_event(InputEvent::key_up(KeyCode::from_code(13)));
        assert_eq!(draw.get_all().len(), 1, "the feature was added");
        assert_eq!(
            only_ring(&draw),
            vec![c(1.0, 1.0), c(2.0, 2.0), c(3.0, 3.0), c(1.0, 1.0)]
        );

        click(&mut draw, 1.0, 1.0);
        assert_eq!(draw.get_all().len(), 1, "no longer drawing");
    }

    #[test]
    fn test_enter_on_incomplete_polygon_keeps_drawing() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 1.0, 1.0);
        click(&mut draw, 2.0, 2.0);

        draw.handle_event(InputEvent::key_up(KeyCode::Enter));
        assert_eq!(draw.mode_name(), ModeName::DrawPolygon);
        let state = draw.mode().as_draw_polygon().map(|m| m.state());
        assert_eq!(state, Some(DrawState::Drawing));
    }

    #[test]
    fn test_exit_before_a_click() {
        let (mut draw, map) = new_draw();
        assert!(draw.get_all().is_empty(), "no features yet");

        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        assert_eq!(draw.get_all().len(), 1, "polygon is added");

        draw.change_mode(ModeName::SimpleSelect, ModeOptions::default());
        assert!(draw.get_all().is_empty(), "polygon is removed");
        assert!(draw.drain_store_events().is_empty());
        assert!(map.lock().double_click_zoom);
    }

    #[test]
    fn test_switching_away_keeps_valid_polygon() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 0.0, 0.0);
        click(&mut draw, 0.0, 10.0);
        click(&mut draw, 10.0, 10.0);

        draw.change_mode(ModeName::SimpleSelect, ModeOptions::default());
        assert_eq!(draw.get_all().len(), 1);
    }

    #[test]
    fn test_delete_all_while_drawing() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 0.0, 0.0);
        click(&mut draw, 0.0, 10.0);
        click(&mut draw, 10.0, 10.0);

        draw.delete_all();
        assert!(draw.get_all().is_empty());
        assert_eq!(draw.mode_name(), ModeName::SimpleSelect);
    }

    #[test]
    fn test_render_while_drawing() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        assert!(draw.render().is_empty());

        click(&mut draw, 0.0, 0.0);
        let records = draw.render();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].geometry,
            Geometry::LineString(vec![c(0.0, 0.0), c(0.0, 0.0)])
        );
        assert!(records[0].is_active());
        assert_eq!(records[0].property_str("meta"), Some("feature"));

        draw.handle_event(InputEvent::mouse_move(0.0, 10.0));
        let records = draw.render();
        assert_eq!(records[0].geometry.kind(), mapdraw_core::GeometryKind::Polygon);
    }

    #[test]
    fn test_keybindings_disabled() {
        let map = HeadlessMap::new();
        let config = DrawConfig {
            keybindings: false,
            ..DrawConfig::new()
        };
        let mut draw = Draw::new(Box::new(map), &config);
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        click(&mut draw, 1.0, 1.0);

        draw.handle_event(InputEvent::key_up(KeyCode::Escape));
        assert_eq!(draw.mode_name(), ModeName::DrawPolygon);
        assert_eq!(draw.get_all().len(), 1);
    }

    #[test]
    fn test_default_mode_from_config() {
        let config = DrawConfig {
            default_mode: ModeName::DrawPolygon,
            ..DrawConfig::new()
        };
        let draw = Draw::new(Box::new(HeadlessMap::new()), &config);
        assert_eq!(draw.mode_name(), ModeName::DrawPolygon);
        assert_eq!(draw.get_all().len(), 1);
    }

    #[test]
    fn test_trash_in_select_deletes_selection() {
        let (mut draw, _map) = new_draw();
        draw.change_mode(ModeName::DrawPolygon, ModeOptions::default());
        for (x, y) in [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 10.0)] {
            click(&mut draw, x, y);
        }
        assert_eq!(draw.selected().len(), 1);

        draw.trash();
        assert!(draw.get_all().is_empty());
        assert_eq!(draw.drain_store_events().len(), 1);
    }
}
