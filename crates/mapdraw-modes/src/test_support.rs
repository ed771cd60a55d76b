//! Recording collaborators for mode tests

use mapdraw_core::{
    DeleteOptions, Feature, FeatureId, FeatureStore, Geometry, MemoryStore, StoreError,
};

use crate::context::{
    DeferredTask, MapAdapter, MapClasses, ModeContext, ModeHost, ModeName, ModeOptions, Scheduler,
    ToolButton, UiController,
};
use crate::events::{EventBus, EventKind, InputEvent, LifecycleContext, Selector, SubscriptionId};
use crate::mode::DrawMode;

/// Calls made on the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Add(FeatureId),
    Delete(Vec<FeatureId>, DeleteOptions),
    FeatureChanged(FeatureId),
    ClearSelected,
    SetSelected(Vec<FeatureId>),
}

/// A memory store logging every mutating call
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub calls: Vec<StoreCall>,
}

impl RecordingStore {
    pub fn count(&self, pred: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn deletes(&self) -> Vec<&StoreCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Delete(..)))
            .collect()
    }
}

impl FeatureStore for RecordingStore {
    fn add(&mut self, feature: Feature) -> FeatureId {
        let id = self.inner.add(feature);
        self.calls.push(StoreCall::Add(id));
        id
    }

    fn delete(&mut self, ids: &[FeatureId], options: DeleteOptions) {
        self.calls.push(StoreCall::Delete(ids.to_vec(), options));
        self.inner.delete(ids, options);
    }

    fn feature_changed(&mut self, id: FeatureId) {
        self.calls.push(StoreCall::FeatureChanged(id));
        self.inner.feature_changed(id);
    }

    fn clear_selected(&mut self) {
        self.calls.push(StoreCall::ClearSelected);
        self.inner.clear_selected();
    }

    fn set_selected(&mut self, ids: &[FeatureId]) {
        self.calls.push(StoreCall::SetSelected(ids.to_vec()));
        self.inner.set_selected(ids);
    }

    fn is_selected(&self, id: FeatureId) -> bool {
        self.inner.is_selected(id)
    }

    fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.inner.get(id)
    }

    fn set_geometry(&mut self, id: FeatureId, geometry: Geometry) -> Result<(), StoreError> {
        self.inner.set_geometry(id, geometry)
    }
}

#[derive(Debug, Default)]
pub struct RecordingUi {
    pub map_classes: Vec<MapClasses>,
    pub active_buttons: Vec<Option<ToolButton>>,
}

impl UiController for RecordingUi {
    fn queue_map_classes(&mut self, classes: MapClasses) {
        self.map_classes.push(classes);
    }

    fn set_active_button(&mut self, button: Option<ToolButton>) {
        self.active_buttons.push(button);
    }
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub disable_calls: usize,
    pub enable_calls: usize,
}

impl MapAdapter for RecordingMap {
    fn disable_double_click_zoom(&mut self) {
        self.disable_calls += 1;
    }

    fn enable_double_click_zoom(&mut self) {
        self.enable_calls += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub requests: Vec<(ModeName, ModeOptions)>,
}

impl ModeHost for RecordingHost {
    fn change_mode(&mut self, name: ModeName, options: ModeOptions) {
        self.requests.push((name, options));
    }
}

#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub tasks: Vec<DeferredTask>,
}

impl Scheduler for RecordingScheduler {
    fn defer(&mut self, task: DeferredTask) {
        self.tasks.push(task);
    }
}

/// An event bus that also logs subscription calls
#[derive(Debug, Default)]
pub struct RecordingLifecycle {
    pub bus: EventBus,
    pub on_calls: Vec<(EventKind, Selector)>,
    pub off_calls: Vec<SubscriptionId>,
}

impl LifecycleContext for RecordingLifecycle {
    fn on(&mut self, kind: EventKind, selector: Selector) -> SubscriptionId {
        self.on_calls.push((kind, selector));
        self.bus.on(kind, selector)
    }

    fn off(&mut self, id: SubscriptionId) {
        self.off_calls.push(id);
        self.bus.off(id);
    }
}

/// All collaborators of a mode, recording what the mode asks of them
#[derive(Debug, Default)]
pub struct TestContext {
    pub store: RecordingStore,
    pub ui: RecordingUi,
    pub map: RecordingMap,
    pub host: RecordingHost,
    pub scheduler: RecordingScheduler,
    pub lifecycle: RecordingLifecycle,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctx(&mut self) -> ModeContext<'_> {
        ModeContext {
            store: &mut self.store,
            ui: &mut self.ui,
            map: &mut self.map,
            host: &mut self.host,
            scheduler: &mut self.scheduler,
            lifecycle: &mut self.lifecycle,
        }
    }

    /// Deliver an event to every matching subscription, like a host would
    pub fn dispatch(&mut self, mode: &mut dyn DrawMode, event: InputEvent) {
        for id in self.lifecycle.bus.matching(&event) {
            if self.lifecycle.bus.is_live(id) {
                mode.handle_event(id, &event, &mut self.ctx());
            }
        }
    }

    pub fn click(&mut self, mode: &mut dyn DrawMode, x: f64, y: f64) {
        self.dispatch(mode, InputEvent::click(x, y));
    }

    pub fn mouse_move(&mut self, mode: &mut dyn DrawMode, x: f64, y: f64) {
        self.dispatch(mode, InputEvent::mouse_move(x, y));
    }
}
