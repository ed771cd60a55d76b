//! Input events and mode subscriptions
//!
//! Modes subscribe to input through a [`LifecycleContext`] and get back a
//! [`SubscriptionId`] for every subscription. The mode owns those handles and
//! releases them itself when it stops; nothing is torn down behind its back.

use mapdraw_core::Coord;
use serde::{Deserialize, Serialize};

/// Keyboard key code of the Escape key
pub const ESCAPE_KEY_CODE: u32 = 27;
/// Keyboard key code of the Enter key
pub const ENTER_KEY_CODE: u32 = 13;

/// A keyboard key, as far as drawing modes care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Enter,
    Other(u32),
}

impl KeyCode {
    /// Map a raw key code
    pub fn from_code(code: u32) -> Self {
        match code {
            ESCAPE_KEY_CODE => KeyCode::Escape,
            ENTER_KEY_CODE => KeyCode::Enter,
            other => KeyCode::Other(other),
        }
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        match self {
            KeyCode::Escape => ESCAPE_KEY_CODE,
            KeyCode::Enter => ENTER_KEY_CODE,
            KeyCode::Other(code) => *code,
        }
    }
}

/// An input event delivered by the map surface, positions in map coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    MouseMove { position: Coord },
    Click { position: Coord },
    KeyUp { key: KeyCode },
}

impl InputEvent {
    /// Pointer move to `(x, y)`
    pub fn mouse_move(x: f64, y: f64) -> Self {
        InputEvent::MouseMove {
            position: Coord::new(x, y),
        }
    }

    /// Click at `(x, y)`
    pub fn click(x: f64, y: f64) -> Self {
        InputEvent::Click {
            position: Coord::new(x, y),
        }
    }

    /// Key released
    pub fn key_up(key: KeyCode) -> Self {
        InputEvent::KeyUp { key }
    }

    /// Get the kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::MouseMove { .. } => EventKind::MouseMove,
            InputEvent::Click { .. } => EventKind::Click,
            InputEvent::KeyUp { .. } => EventKind::KeyUp,
        }
    }
}

/// Event names a mode can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseMove,
    Click,
    KeyUp,
}

impl EventKind {
    /// Get the event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::MouseMove => "mousemove",
            EventKind::Click => "click",
            EventKind::KeyUp => "keyup",
        }
    }
}

/// Predicate deciding whether a subscription receives an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every event of the subscribed kind
    Always,
    IsEscapeKey,
    IsEnterKey,
}

impl Selector {
    /// Check if an event passes this selector
    pub fn matches(&self, event: &InputEvent) -> bool {
        match self {
            Selector::Always => true,
            Selector::IsEscapeKey => matches!(
                event,
                InputEvent::KeyUp {
                    key: KeyCode::Escape
                }
            ),
            Selector::IsEnterKey => matches!(
                event,
                InputEvent::KeyUp {
                    key: KeyCode::Enter
                }
            ),
        }
    }
}

/// Handle of one event subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Subscription registry a mode sees while it is active
pub trait LifecycleContext {
    /// Subscribe to events of `kind` passing `selector`
    fn on(&mut self, kind: EventKind, selector: Selector) -> SubscriptionId;

    /// Release a subscription; releasing twice is harmless
    fn off(&mut self, id: SubscriptionId);
}

/// A registered subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub kind: EventKind,
    pub selector: Selector,
}

/// Subscription registry owned by the host
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the live subscriptions receiving `event`, in registration order
    pub fn matching(&self, event: &InputEvent) -> Vec<SubscriptionId> {
        let kind = event.kind();
        self.subscriptions
            .iter()
            .filter(|s| s.kind == kind && s.selector.matches(event))
            .map(|s| s.id)
            .collect()
    }

    /// Check if a subscription has not been released
    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if there are no live subscriptions
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Get the live subscriptions
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }
}

impl LifecycleContext for EventBus {
    fn on(&mut self, kind: EventKind, selector: Selector) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, selector });
        id
    }

    fn off(&mut self, id: SubscriptionId) {
        self.subscriptions.retain(|s| s.id != id);
    }
}
