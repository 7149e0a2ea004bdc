//! Movement primitives
//!
//! The queue that carries movement vectors to the worker, the bounded
//! history of believed positions, and the trajectory generator.

pub mod history;
pub mod queue;
pub mod trajectory;
pub mod types;

pub use history::{MovementHistory, HISTORY_CAPACITY};
pub use queue::CommandQueue;
pub use types::{MovementVector, Position};
