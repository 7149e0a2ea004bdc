//! Executes movements through the selected output backend
//!
//! The dispatcher owns the worker-side random source and the selection
//! policy. Whoever holds it is the only writer of the pointer position.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Settings;
use crate::error::MotionError;
use crate::humanize::Humanizer;
use crate::motion::{trajectory, MovementVector, Position};

use super::channel::{PointerRequest, PrivilegedChannel};
use super::platform::PointerPlatform;
use super::selector::{BackendSelector, RandomSelector};
use super::BackendKind;

/// Interior control points of a curved path
pub const CURVE_CONTROL_POINTS: usize = 2;

/// Backends usable for the fast, non-humanized large-move path
const FAST_BACKENDS: [BackendKind; 2] = [BackendKind::SyntheticEvent, BackendKind::DirectPlacement];

pub struct Dispatcher {
    platform: Arc<dyn PointerPlatform>,
    channel: Option<Arc<dyn PrivilegedChannel>>,
    channel_available: bool,
    channel_probed: bool,
    humanizer: Humanizer,
    selector: Box<dyn BackendSelector>,
}

impl Dispatcher {
    /// Create a dispatcher with random selection and no privileged channel
    pub fn new(platform: Arc<dyn PointerPlatform>, humanizer: Humanizer) -> Self {
        Self {
            platform,
            channel: None,
            channel_available: false,
            channel_probed: false,
            humanizer,
            selector: Box::new(RandomSelector),
        }
    }

    /// Replace the selection policy
    pub fn with_selector(mut self, selector: Box<dyn BackendSelector>) -> Self {
        self.set_selector(selector);
        self
    }

    /// Attach a privileged channel; it stays unselectable until probed
    pub fn with_channel(mut self, channel: Arc<dyn PrivilegedChannel>) -> Self {
        self.set_channel(channel);
        self
    }

    pub fn set_selector(&mut self, selector: Box<dyn BackendSelector>) {
        self.selector = selector;
    }

    pub fn set_channel(&mut self, channel: Arc<dyn PrivilegedChannel>) {
        self.channel = Some(channel);
        self.channel_available = false;
        self.channel_probed = false;
    }

    /// A channel is attached but has not been probed yet
    pub fn needs_probe(&self) -> bool {
        self.channel.is_some() && !self.channel_probed
    }

    /// Connect the privileged channel and record whether it is usable
    pub fn probe_channel(&mut self) -> Result<(), MotionError> {
        let Some(channel) = &self.channel else {
            self.channel_available = false;
            return Err(MotionError::ChannelDisconnected);
        };

        self.channel_probed = true;
        self.channel_available = channel.try_connect() && channel.is_connected();
        if self.channel_available {
            Ok(())
        } else {
            Err(MotionError::ChannelDisconnected)
        }
    }

    pub fn channel_available(&self) -> bool {
        self.channel_available
    }

    pub fn set_humanizer(&mut self, humanizer: Humanizer) {
        self.humanizer = humanizer;
    }

    pub fn humanizer(&mut self) -> &mut Humanizer {
        &mut self.humanizer
    }

    pub fn current_position(&self) -> Position {
        self.platform.current_position()
    }

    /// Backends eligible for humanized selection
    pub fn available_backends(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|&kind| kind != BackendKind::PrivilegedChannel || self.channel_available)
            .collect()
    }

    /// Move by `delta` from `origin` using one specific backend
    pub fn execute(
        &mut self,
        kind: BackendKind,
        delta: MovementVector,
        origin: Position,
    ) -> Result<(), MotionError> {
        match kind {
            BackendKind::SyntheticEvent => {
                let wobble =
                    MovementVector::new(self.humanizer.axis_jitter(), self.humanizer.axis_jitter());
                let delta = MovementVector::new(
                    delta.dx.saturating_add(wobble.dx),
                    delta.dy.saturating_add(wobble.dy),
                );
                let placed = self.platform.attempt_relative(delta);
                pause(self.humanizer.settle_delay());
                placed.then_some(()).ok_or(MotionError::Placement {
                    kind,
                    target: origin.offset(delta),
                })
            }
            BackendKind::DirectPlacement => {
                let target = origin.offset(delta);
                self.platform
                    .attempt_absolute(target)
                    .then_some(())
                    .ok_or(MotionError::Placement { kind, target })
            }
            BackendKind::PrivilegedChannel => {
                let target = origin.offset(delta);
                self.send_privileged(target)
            }
        }
    }

    fn send_privileged(&self, target: Position) -> Result<(), MotionError> {
        let kind = BackendKind::PrivilegedChannel;
        let channel = match &self.channel {
            Some(channel) if self.channel_available => channel,
            _ => return Err(MotionError::BackendUnavailable(kind)),
        };

        if !channel.is_connected() {
            return Err(MotionError::ChannelDisconnected);
        }

        channel
            .send(PointerRequest::movement(target))
            .then_some(())
            .ok_or(MotionError::Placement { kind, target })
    }

    /// Jitter the delta, hand it to a randomly selected backend, then wait
    /// out a short reaction latency
    pub fn humanized_step(
        &mut self,
        delta: MovementVector,
        settings: &Settings,
    ) -> Result<BackendKind, MotionError> {
        let origin = self.platform.current_position();
        let delta = MovementVector::new(
            self.humanizer.jitter(delta.dx, settings.jitter_amount),
            self.humanizer.jitter(delta.dy, settings.jitter_amount),
        );

        let candidates = self.available_backends();
        let kind = self.selector.select(&candidates, &mut self.humanizer);
        let outcome = self.execute(kind, delta, origin);

        pause(self.humanizer.reaction_delay());
        outcome.map(|()| kind)
    }

    /// Split between the synthetic-event and direct-placement backends
    pub fn fast_step(
        &mut self,
        delta: MovementVector,
        origin: Position,
    ) -> Result<BackendKind, MotionError> {
        let kind = self.selector.select(&FAST_BACKENDS, &mut self.humanizer);
        self.execute(kind, delta, origin).map(|()| kind)
    }

    /// Walk a randomized curve from `start` to `end`
    ///
    /// Each sampled point is jittered and placed with a short delay. A
    /// final placement at `end` always follows, correcting any drift. Only
    /// that final placement decides the result.
    pub fn curved_path(
        &mut self,
        start: Position,
        end: Position,
        settings: &Settings,
    ) -> Result<Vec<Position>, MotionError> {
        let curve = trajectory::generate_bezier_curve(
            &mut self.humanizer,
            start,
            end,
            CURVE_CONTROL_POINTS,
            settings.humanization_level,
            settings.path_deviation,
        );

        for point in curve.iter().skip(1) {
            let target = Position::new(
                self.humanizer.jitter(point.x, settings.jitter_amount),
                self.humanizer.jitter(point.y, settings.jitter_amount),
            );
            if !self.platform.attempt_absolute(target) {
                log::warn!("Curve point ({}, {}) not placed", target.x, target.y);
            }
            pause(self.humanizer.segment_delay(settings.movement_delay_micros));
        }

        if !self.platform.attempt_absolute(end) {
            return Err(MotionError::Placement {
                kind: BackendKind::DirectPlacement,
                target: end,
            });
        }

        Ok(curve)
    }
}

pub(crate) fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
