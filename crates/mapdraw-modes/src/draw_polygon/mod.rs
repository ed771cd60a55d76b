//! Polygon drawing mode
//!
//! Clicks place vertices, pointer moves preview the next one, and a click on
//! the last placed vertex (or Enter) finishes the polygon. Escape or trash
//! throws it away.

mod render;

pub use render::render_polygon;

use mapdraw_core::{Coord, DeleteOptions, DisplayFeature, Feature, FeatureId, Ring};
use tracing::{debug, info, warn};

use crate::context::{
    DeferredTask, MapClasses, ModeContext, ModeName, ModeOptions, ModeSettings, MouseHint,
    ToolButton,
};
use crate::events::{EventKind, InputEvent, LifecycleContext, Selector, SubscriptionId};
use crate::mode::DrawMode;

/// Mode that takes over once drawing completes or is cancelled
const FINISH_MODE: ModeName = ModeName::SimpleSelect;

/// Where the state machine is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    /// Not started, or already stopped
    #[default]
    Idle,
    /// Accepting vertices
    Drawing,
    /// Finished with a valid polygon, waiting for the host to switch modes
    Completed,
    /// Abandoned, waiting for the host to switch modes
    Cancelled,
}

/// How the last drawing session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The polygon was kept
    Completed(FeatureId),
    /// The polygon was discarded
    Discarded,
}

/// Which handler a subscription feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    MouseMove,
    Click,
    Escape,
    Enter,
}

/// Subscriptions held by one drawing session
#[derive(Debug, Clone, Copy)]
struct SessionSubscriptions {
    mouse_move: SubscriptionId,
    click: SubscriptionId,
    escape: Option<SubscriptionId>,
    enter: Option<SubscriptionId>,
}

impl SessionSubscriptions {
    fn register(lifecycle: &mut dyn LifecycleContext, keybindings: bool) -> Self {
        let mouse_move = lifecycle.on(EventKind::MouseMove, Selector::Always);
        let click = lifecycle.on(EventKind::Click, Selector::Always);
        let (escape, enter) = if keybindings {
            (
                Some(lifecycle.on(EventKind::KeyUp, Selector::IsEscapeKey)),
                Some(lifecycle.on(EventKind::KeyUp, Selector::IsEnterKey)),
            )
        } else {
            (None, None)
        };
        Self {
            mouse_move,
            click,
            escape,
            enter,
        }
    }

    fn handler_for(&self, id: SubscriptionId) -> Option<Handler> {
        if id == self.mouse_move {
            Some(Handler::MouseMove)
        } else if id == self.click {
            Some(Handler::Click)
        } else if self.escape == Some(id) {
            Some(Handler::Escape)
        } else if self.enter == Some(id) {
            Some(Handler::Enter)
        } else {
            None
        }
    }

    fn release(self, lifecycle: &mut dyn LifecycleContext) {
        lifecycle.off(self.mouse_move);
        lifecycle.off(self.click);
        for id in [self.escape, self.enter].into_iter().flatten() {
            lifecycle.off(id);
        }
    }
}

/// State of one activation of the mode
#[derive(Debug)]
struct DrawingSession {
    feature_id: FeatureId,
    ring: Ring,
    subscriptions: SessionSubscriptions,
}

impl DrawingSession {
    /// Push the ring into the stored feature and flag it for redraw
    fn sync(&self, ctx: &mut ModeContext<'_>) {
        if let Err(e) = ctx.store.set_geometry(self.feature_id, self.ring.to_geometry()) {
            warn!("Failed to update polygon being drawn: {}", e);
            return;
        }
        ctx.store.feature_changed(self.feature_id);
    }
}

/// Interactive polygon drawing
#[derive(Debug)]
pub struct DrawPolygonMode {
    settings: ModeSettings,
    state: DrawState,
    session: Option<DrawingSession>,
    outcome: Option<DrawOutcome>,
}

impl Default for DrawPolygonMode {
    fn default() -> Self {
        Self::new(ModeSettings::default())
    }
}

impl DrawPolygonMode {
    /// Create an idle mode
    pub fn new(settings: ModeSettings) -> Self {
        Self {
            settings,
            state: DrawState::Idle,
            session: None,
            outcome: None,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Id of the polygon being drawn
    pub fn feature_id(&self) -> Option<FeatureId> {
        self.session.as_ref().map(|s| s.feature_id)
    }

    /// Get the ring being drawn
    pub fn ring(&self) -> Option<&Ring> {
        self.session.as_ref().map(|s| &s.ring)
    }

    /// How the last session ended, once stopped
    pub fn outcome(&self) -> Option<DrawOutcome> {
        self.outcome
    }

    /// Id of the polygon the last session completed
    pub fn completed_feature(&self) -> Option<FeatureId> {
        match self.outcome {
            Some(DrawOutcome::Completed(id)) => Some(id),
            _ => None,
        }
    }

    fn on_mouse_move(&mut self, position: Coord, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ring.insert_or_update_floating_vertex(position);
        session.sync(ctx);
    }

    fn on_click(&mut self, position: Coord, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.ring.is_closing_click(position) {
            let mut finished = session.ring.clone();
            finished.finalize();
            if finished.is_valid() {
                self.complete(ctx);
                return;
            }
            debug!("Closing click on an incomplete polygon, adding vertex instead");
        }

        session.ring.commit_vertex(position);
        debug!(
            "Committed vertex ({}, {}), ring has {} coordinates",
            position.x,
            position.y,
            session.ring.coordinate_count()
        );
        session.sync(ctx);
    }

    fn on_enter(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.ring.is_valid() {
            self.complete(ctx);
        } else {
            debug!("Enter ignored, polygon has too few vertices");
        }
    }

    /// Keep the polygon and hand it over to the finish mode
    fn complete(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ring.finalize();
        session.sync(ctx);
        self.state = DrawState::Completed;

        let id = session.feature_id;
        info!(
            "Completed polygon {} with {} coordinates",
            id,
            session.ring.coordinate_count()
        );
        ctx.host
            .change_mode(FINISH_MODE, ModeOptions::select(vec![id]));
    }

    /// Discard the polygon, whatever its state
    fn cancel(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        ctx.store
            .delete(&[session.feature_id], DeleteOptions::silent());
        self.state = DrawState::Cancelled;

        info!("Cancelled polygon {}", session.feature_id);
        ctx.host
            .change_mode(FINISH_MODE, ModeOptions::default());
    }
}

impl DrawMode for DrawPolygonMode {
    fn name(&self) -> ModeName {
        ModeName::DrawPolygon
    }

    fn start(&mut self, ctx: &mut ModeContext<'_>) {
        if self.session.is_some() {
            warn!("Polygon drawing already started");
            return;
        }

        let feature_id = ctx.store.add(Feature::empty_polygon());
        ctx.store.clear_selected();
        ctx.ui.queue_map_classes(MapClasses {
            mouse: MouseHint::Add,
        });
        ctx.ui.set_active_button(Some(ToolButton::Polygon));
        ctx.map.disable_double_click_zoom();

        let subscriptions = SessionSubscriptions::register(ctx.lifecycle, self.settings.keybindings);
        self.session = Some(DrawingSession {
            feature_id,
            ring: Ring::new(),
            subscriptions,
        });
        self.state = DrawState::Drawing;
        self.outcome = None;

        info!("Started drawing polygon {}", feature_id);
    }

    fn stop(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(session) = self.session.take() else {
            return;
        };
        session.subscriptions.release(ctx.lifecycle);

        let keep = self.state != DrawState::Cancelled && session.ring.is_valid();
        if !keep && self.state != DrawState::Cancelled {
            ctx.store
                .delete(&[session.feature_id], DeleteOptions::silent());
        }

        ctx.ui.set_active_button(None);
        ctx.scheduler.defer(DeferredTask::EnableDoubleClickZoom);

        self.outcome = Some(if keep {
            DrawOutcome::Completed(session.feature_id)
        } else {
            DrawOutcome::Discarded
        });
        self.state = DrawState::Idle;

        info!("Stopped drawing polygon {} (kept: {})", session.feature_id, keep);
    }

    fn handle_event(
        &mut self,
        subscription: SubscriptionId,
        event: &InputEvent,
        ctx: &mut ModeContext<'_>,
    ) {
        if self.state != DrawState::Drawing {
            return;
        }
        let Some(handler) = self
            .session
            .as_ref()
            .and_then(|s| s.subscriptions.handler_for(subscription))
        else {
            return;
        };

        match (handler, event) {
            (Handler::MouseMove, InputEvent::MouseMove { position }) => {
                self.on_mouse_move(*position, ctx);
            }
            (Handler::Click, InputEvent::Click { position }) => {
                self.on_click(*position, ctx);
            }
            (Handler::Escape, InputEvent::KeyUp { .. }) => self.cancel(ctx),
            (Handler::Enter, InputEvent::KeyUp { .. }) => self.on_enter(ctx),
            (handler, event) => {
                warn!("Event {:?} delivered to {:?} handler", event.kind(), handler);
            }
        }
    }

    fn render(&self, feature: &Feature, push: &mut dyn FnMut(DisplayFeature)) {
        let is_active = self.feature_id() == Some(feature.id);
        if let Some(display) = render_polygon(feature, is_active) {
            push(display);
        }
    }

    fn trash(&mut self, ctx: &mut ModeContext<'_>) {
        if self.state == DrawState::Drawing {
            self.cancel(ctx);
        }
    }
}
