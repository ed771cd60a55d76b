//! Draw configuration module
//!
//! This module handles the settings an embedder can change: which mode the
//! controller starts in and whether keyboard shortcuts are active. Finished or
//! cancelled drawings always hand over to the select mode.

mod manager;

pub use manager::{ConfigError, ConfigManager};

use mapdraw_modes::{ModeName, ModeSettings};
use serde::{Deserialize, Serialize};

/// Complete draw controller configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Mode the controller starts in
    #[serde(default)]
    pub default_mode: ModeName,
    /// Enable Escape/Enter shortcuts while drawing
    #[serde(default = "default_keybindings")]
    pub keybindings: bool,
}

fn default_keybindings() -> bool {
    true
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            version: 0,
            default_mode: ModeName::SimpleSelect,
            keybindings: default_keybindings(),
        }
    }
}

impl DrawConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    /// Mode switches derived from this configuration
    pub fn mode_settings(&self) -> ModeSettings {
        ModeSettings {
            keybindings: self.keybindings,
        }
    }
}
