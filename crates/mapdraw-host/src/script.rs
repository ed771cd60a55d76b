//! Scripted input sessions
//!
//! A script is a RON list of steps replayed against a [`Draw`] controller:
//!
//! ```ron
//! (steps: [
//!     ChangeMode(draw_polygon),
//!     Click(10.0, 20.0),
//!     Move(15.0, 23.0),
//!     Key(Enter),
//! ])
//! ```

use std::path::Path;

use mapdraw_modes::{InputEvent, KeyCode, ModeName, ModeOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::draw::Draw;

/// Script-related errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One step of a scripted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    /// Switch modes
    ChangeMode(ModeName),
    /// Pointer move to a map coordinate
    Move(f64, f64),
    /// Click at a map coordinate
    Click(f64, f64),
    /// Key released
    Key(KeyCode),
    /// Delete what the active mode is working on
    Trash,
    /// Delete every feature
    DeleteAll,
}

/// A replayable input session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from RON text
    pub fn from_ron(source: &str) -> Result<Self, ScriptError> {
        Ok(ron::from_str(source)?)
    }

    /// Read and parse a script file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    /// Replay every step against a controller
    pub fn run(&self, draw: &mut Draw) {
        for step in &self.steps {
            debug!("Replaying {:?}", step);
            match step {
                ScriptStep::ChangeMode(name) => draw.change_mode(*name, ModeOptions::default()),
                ScriptStep::Move(x, y) => draw.handle_event(InputEvent::mouse_move(*x, *y)),
                ScriptStep::Click(x, y) => draw.handle_event(InputEvent::click(*x, *y)),
                ScriptStep::Key(key) => draw.handle_event(InputEvent::key_up(*key)),
                ScriptStep::Trash => draw.trash(),
                ScriptStep::DeleteAll => draw.delete_all(),
            }
        }
    }
}
