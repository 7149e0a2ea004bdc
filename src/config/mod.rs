//! Configuration module
//!
//! Handles humanization settings and their live, thread-shared form.

pub mod settings;
pub mod shared;

pub use settings::{MovementStyle, Settings};
pub use shared::SharedSettings;
