//! Mapdraw host
//!
//! Embeds the drawing modes over a map surface: the [`Draw`] controller,
//! its configuration, and scripted replay of input sessions.

pub mod config;
pub mod draw;
pub mod error;
pub mod map;
pub mod script;
pub mod ui;

pub use config::{ConfigError, ConfigManager, DrawConfig};
pub use draw::Draw;
pub use error::HostError;
pub use map::{HeadlessMap, MapState, SharedMapState};
pub use script::{Script, ScriptError, ScriptStep};
pub use ui::UiState;
