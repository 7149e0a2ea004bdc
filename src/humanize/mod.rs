//! Humanization module
//!
//! Supplies the randomness that keeps automated movement from looking
//! machine-precise:
//! - Proportional jitter on deltas and path points
//! - Randomized inter-movement, segment and reaction delays
//! - Uniform picks used by backend selection

pub mod humanizer;

pub use humanizer::Humanizer;
