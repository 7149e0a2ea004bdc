//! Bounded record of the positions the engine believes it moved to
//!
//! Diagnostic only: nothing reads it for correctness.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::Position;

/// Number of positions retained
pub const HISTORY_CAPACITY: usize = 10;

/// Last [`HISTORY_CAPACITY`] believed positions, oldest first
#[derive(Debug)]
pub struct MovementHistory {
    entries: Mutex<VecDeque<Position>>,
}

impl Default for MovementHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementHistory {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY + 1)),
        }
    }

    /// Append a position, evicting the oldest past capacity
    pub fn record(&self, position: Position) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_back(position);
        while entries.len() > HISTORY_CAPACITY {
            entries.pop_front();
        }
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Copy of the retained positions, oldest first
    pub fn snapshot(&self) -> Vec<Position> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    pub fn latest(&self) -> Option<Position> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
