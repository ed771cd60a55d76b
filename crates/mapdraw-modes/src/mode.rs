//! Mode lifecycle definition

use mapdraw_core::{DisplayFeature, Feature};

use crate::context::{ModeContext, ModeName, ModeOptions, ModeSettings};
use crate::draw_polygon::DrawPolygonMode;
use crate::events::{InputEvent, SubscriptionId};
use crate::simple_select::SimpleSelectMode;

/// Lifecycle every interaction mode implements.
///
/// The host calls [`start`](DrawMode::start) when the mode becomes active,
/// forwards each event to [`handle_event`](DrawMode::handle_event) together
/// with the subscription it matched, and calls [`stop`](DrawMode::stop) when
/// switching away. [`render`](DrawMode::render) may be called at any time.
pub trait DrawMode {
    /// Returns the name of this mode.
    fn name(&self) -> ModeName;

    /// Called when the mode becomes active.
    fn start(&mut self, ctx: &mut ModeContext<'_>);

    /// Called when the host switches away from this mode.
    fn stop(&mut self, ctx: &mut ModeContext<'_>);

    /// Handle an event delivered through one of this mode's subscriptions.
    fn handle_event(
        &mut self,
        subscription: SubscriptionId,
        event: &InputEvent,
        ctx: &mut ModeContext<'_>,
    );

    /// Turn a stored feature into zero or more display records.
    fn render(&self, feature: &Feature, push: &mut dyn FnMut(DisplayFeature));

    /// Called when the user asks to delete what the mode is working on.
    fn trash(&mut self, _ctx: &mut ModeContext<'_>) {}
}

/// The closed set of modes a host can run
#[derive(Debug)]
pub enum Mode {
    SimpleSelect(SimpleSelectMode),
    DrawPolygon(DrawPolygonMode),
}

impl Mode {
    /// Create a mode by name
    pub fn create(name: ModeName, settings: ModeSettings, options: ModeOptions) -> Self {
        match name {
            ModeName::SimpleSelect => Mode::SimpleSelect(SimpleSelectMode::new(options.feature_ids)),
            ModeName::DrawPolygon => Mode::DrawPolygon(DrawPolygonMode::new(settings)),
        }
    }

    /// Get the polygon drawing mode if that is what is running
    pub fn as_draw_polygon(&self) -> Option<&DrawPolygonMode> {
        match self {
            Mode::DrawPolygon(mode) => Some(mode),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn DrawMode {
        match self {
            Mode::SimpleSelect(mode) => mode,
            Mode::DrawPolygon(mode) => mode,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DrawMode {
        match self {
            Mode::SimpleSelect(mode) => mode,
            Mode::DrawPolygon(mode) => mode,
        }
    }
}

impl DrawMode for Mode {
    fn name(&self) -> ModeName {
        self.inner().name()
    }

    fn start(&mut self, ctx: &mut ModeContext<'_>) {
        self.inner_mut().start(ctx);
    }

    fn stop(&mut self, ctx: &mut ModeContext<'_>) {
        self.inner_mut().stop(ctx);
    }

    fn handle_event(
        &mut self,
        subscription: SubscriptionId,
        event: &InputEvent,
        ctx: &mut ModeContext<'_>,
    ) {
        self.inner_mut().handle_event(subscription, event, ctx);
    }

    fn render(&self, feature: &Feature, push: &mut dyn FnMut(DisplayFeature)) {
        self.inner().render(feature, push);
    }

    fn trash(&mut self, ctx: &mut ModeContext<'_>) {
        self.inner_mut().trash(ctx);
    }
}
