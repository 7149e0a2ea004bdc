//! Error types for the movement engine
//!
//! None of these cross the public movement API: callers get a boolean and
//! the engine logs the error. They exist so internal paths can use `?`.

use crate::backend::BackendKind;
use crate::motion::Position;

/// Errors raised while queuing or executing a movement
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Engine not initialized")]
    NotInitialized,
    #[error("Output backend unavailable: {0}")]
    BackendUnavailable(BackendKind),
    #[error("Privileged channel disconnected")]
    ChannelDisconnected,
    #[error("{kind} failed to place pointer at ({}, {})", .target.x, .target.y)]
    Placement { kind: BackendKind, target: Position },
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
