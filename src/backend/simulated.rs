//! In-memory pointer for tests and the desktop demo
//!
//! Tracks a virtual position and records every call made against it, so
//! engine behavior can be checked without a display.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::motion::{MovementVector, Position};

use super::channel::{PointerRequest, PrivilegedChannel};
use super::platform::PointerPlatform;

/// A call observed by the simulated pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCall {
    Relative(MovementVector),
    Absolute(Position),
    Privileged(Position),
}

#[derive(Debug, Default)]
struct PointerState {
    position: Position,
    calls: Vec<PointerCall>,
}

/// Virtual pointer implementing [`PointerPlatform`]
#[derive(Debug, Default)]
pub struct SimulatedPointer {
    state: Mutex<PointerState>,
    failing: AtomicBool,
}

impl SimulatedPointer {
    /// Create a pointer resting at `position`
    pub fn new(position: Position) -> Self {
        Self {
            state: Mutex::new(PointerState {
                position,
                calls: Vec::new(),
            }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every placement attempt fail (position queries still work)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Move the pointer without recording a call, as a user would
    pub fn warp(&self, position: Position) {
        self.state().position = position;
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<PointerCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn state(&self) -> MutexGuard<'_, PointerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn place(&self, call: PointerCall) -> bool {
        if self.failing.load(Ordering::Relaxed) {
            return false;
        }

        let mut state = self.state();
        state.position = match call {
            PointerCall::Relative(delta) => state.position.offset(delta),
            PointerCall::Absolute(target) | PointerCall::Privileged(target) => target,
        };
        state.calls.push(call);
        true
    }
}

impl PointerPlatform for SimulatedPointer {
    fn current_position(&self) -> Position {
        self.state().position
    }

    fn attempt_relative(&self, delta: MovementVector) -> bool {
        self.place(PointerCall::Relative(delta))
    }

    fn attempt_absolute(&self, target: Position) -> bool {
        self.place(PointerCall::Absolute(target))
    }
}

/// Privileged channel that lands on a [`SimulatedPointer`]
#[derive(Debug)]
pub struct SimulatedChannel {
    pointer: Arc<SimulatedPointer>,
    reachable: bool,
    connected: AtomicBool,
}

impl SimulatedChannel {
    /// `reachable` decides whether `try_connect` succeeds
    pub fn new(pointer: Arc<SimulatedPointer>, reachable: bool) -> Self {
        Self {
            pointer,
            reachable,
            connected: AtomicBool::new(false),
        }
    }

    /// Drop the link, as if the far side went away
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Relaxed);
    }
}

impl PrivilegedChannel for SimulatedChannel {
    fn try_connect(&self) -> bool {
        self.connected.store(self.reachable, Ordering::Relaxed);
        self.reachable
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn send(&self, request: PointerRequest) -> bool {
        self.is_connected() && self.pointer.place(PointerCall::Privileged(request.target()))
    }
}
