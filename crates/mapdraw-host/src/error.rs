//! Host error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::script::ScriptError;

/// Errors surfaced by the command-line replay
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
