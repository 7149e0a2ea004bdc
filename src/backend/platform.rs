//! Host pointer primitives
//!
//! The engine never touches an OS API directly; it goes through
//! [`PointerPlatform`]. Hosts implement it over their native calls.

use crate::motion::{MovementVector, Position};

/// Position query plus the two unprivileged placement primitives
pub trait PointerPlatform: Send + Sync {
    /// Current pointer position; assumed cheap and always successful
    fn current_position(&self) -> Position;

    /// Inject a relative displacement as a synthetic input event
    fn attempt_relative(&self, delta: MovementVector) -> bool;

    /// Place the pointer at an absolute position
    fn attempt_absolute(&self, target: Position) -> bool;
}
