//! Pointer Humanizer - queued, humanized pointer movement
//!
//! This library sits between a caller asking for pointer movement and the
//! host call that actually places the pointer. Requests are quantized into
//! small steps, queued, and carried out by a background worker that blends
//! several output backends under configurable randomness. Long absolute
//! moves can follow a jittered Bezier curve instead of a straight line.
//!
//! ## Layout
//!
//! - `config`: settings and their clamping rules
//! - `humanize`: the injectable random source
//! - `motion`: queue, history and trajectory generation
//! - `backend`: platform traits, backend variants and selection
//! - `engine`: the orchestrator and its worker
//! - `bridge`: process-wide convenience calls for host bindings

pub mod backend;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod humanize;
pub mod motion;

pub use backend::{BackendKind, PointerPlatform, PrivilegedChannel};
pub use config::{MovementStyle, Settings};
pub use engine::{Direction, Engine, EngineState};
pub use error::MotionError;
pub use motion::{MovementVector, Position};
