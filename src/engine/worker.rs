//! Worker loop draining the command queue
//!
//! Runs on its own thread and is the only consumer of the queue. Each
//! popped vector is turned into one or more backend calls according to the
//! live settings, followed by the inter-movement delay.

use std::sync::{Arc, PoisonError};
use std::thread;

use crate::backend::dispatcher::pause;
use crate::backend::{BackendKind, Dispatcher};
use crate::config::Settings;
use crate::error::MotionError;
use crate::motion::MovementVector;

use super::Shared;

/// Largest per-axis delta handled by the small-move path
pub const SMALL_MOVE_LIMIT: i32 = 5;

/// How a queued vector was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPath {
    /// Small move, humanization off: raw direct placement
    Raw,
    /// Jittered step through a randomly selected backend
    Humanized(BackendKind),
    /// Large move through the synthetic-event or direct backend
    Fast(BackendKind),
}

/// Drain the queue until it is closed and empty
pub(super) fn run(shared: Arc<Shared>) {
    log::info!("Movement worker started");

    while let Some(vector) = shared.queue.pop() {
        let settings = shared.settings.snapshot();
        if !settings.enabled {
            log::debug!("Movement disabled, discarding ({}, {})", vector.dx, vector.dy);
            continue;
        }

        let delay = {
            let mut dispatcher = shared
                .dispatcher
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            match process(&mut dispatcher, vector, &settings) {
                Ok(path) => log::debug!("Moved ({}, {}) via {:?}", vector.dx, vector.dy, path),
                Err(e) => log::warn!("Dropped movement ({}, {}): {}", vector.dx, vector.dy, e),
            }

            dispatcher
                .humanizer()
                .inter_movement_delay(settings.movement_delay_micros, settings.humanization_level)
        };

        pause(delay);
        thread::yield_now();
    }

    log::info!("Movement worker drained, exiting");
}

/// Carry out one queued vector
pub fn process(
    dispatcher: &mut Dispatcher,
    vector: MovementVector,
    settings: &Settings,
) -> Result<StepPath, MotionError> {
    let origin = dispatcher.current_position();

    if vector.within(SMALL_MOVE_LIMIT) {
        if settings.humanization_level > 0 {
            return dispatcher
                .humanized_step(vector, settings)
                .map(StepPath::Humanized);
        }
        dispatcher.execute(BackendKind::DirectPlacement, vector, origin)?;
        return Ok(StepPath::Raw);
    }

    if dispatcher
        .humanizer()
        .chance_in_ten(settings.humanization_level)
    {
        dispatcher
            .humanized_step(vector, settings)
            .map(StepPath::Humanized)
    } else {
        dispatcher.fast_step(vector, origin).map(StepPath::Fast)
    }
}
