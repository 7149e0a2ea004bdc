//! Command queue between caller threads and the movement worker
//!
//! An unbounded channel: producers never block, the single consumer blocks
//! in [`CommandQueue::pop`]. Closing drops the only sender, so the receiver
//! still yields everything queued before the close and only then reports
//! the queue as closed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

/// Thread-safe FIFO with drain-then-close semantics
#[derive(Debug)]
pub struct CommandQueue<T> {
    sender: Mutex<Option<Sender<T>>>,
    receiver: Mutex<Receiver<T>>,
    pending: AtomicUsize,
}

impl<T> Default for CommandQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CommandQueue<T> {
    /// Create an open, empty queue
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(receiver),
            pending: AtomicUsize::new(0),
        }
    }

    /// Enqueue an item and wake the consumer
    ///
    /// Returns false once the queue has been closed; the item is dropped.
    pub fn push(&self, item: T) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = sender.as_ref() else {
            return false;
        };
        // Count before sending so pop never sees the counter go negative
        self.pending.fetch_add(1, Ordering::AcqRel);
        if sender.send(item).is_err() {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            return false;
        }
        true
    }

    /// Block until an item is available
    ///
    /// Returns `None` once the queue is closed and drained.
    pub fn pop(&self) -> Option<T> {
        let receiver = self
            .receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let item = receiver.recv().ok();
        if item.is_some() {
            self.pending.fetch_sub(1, Ordering::AcqRel);
        }
        item
    }

    /// Items pushed but not yet popped
    pub fn len(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop accepting items and wake the consumer; idempotent
    pub fn close(&self) {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        sender.take();
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
