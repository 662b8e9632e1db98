//! Unbounded FIFO handing records from producers to the worker
//!
//! Producers never block beyond the short queue lock. The single consumer
//! waits on one condition variable for "has item OR shutdown requested";
//! both `push` and `signal_shutdown` change that condition under the same
//! lock and notify the same condvar, so a wakeup cannot be missed.

use super::record::FormattedRecord;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of [`LogQueue::pop_blocking`]
#[derive(Debug, PartialEq, Eq)]
pub enum Pop {
    /// The oldest queued record
    Record(FormattedRecord),
    /// Shutdown was requested and the queue is empty
    Shutdown,
}

#[derive(Debug, Default)]
pub struct LogQueue {
    items: Mutex<VecDeque<FormattedRecord>>,
    ready: Condvar,
    // Written only while `items` is locked; read lock-free.
    exit: AtomicBool,
}

impl LogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the tail and wake one waiting consumer.
    ///
    /// A push after [`signal_shutdown`](Self::signal_shutdown) is still
    /// accepted; it is written only if the consumer has not yet observed
    /// the queue empty.
    pub fn push(&self, record: FormattedRecord) {
        let mut items = self.items.lock();
        items.push_back(record);
        drop(items);
        self.ready.notify_one();
    }

    /// Block until a record is available or shutdown leaves the queue empty.
    ///
    /// Queued records are always handed out before [`Pop::Shutdown`], which
    /// is what lets the worker drain on shutdown.
    pub fn pop_blocking(&self) -> Pop {
        let mut items = self.items.lock();
        loop {
            if let Some(record) = items.pop_front() {
                return Pop::Record(record);
            }
            if self.exit.load(Ordering::Acquire) {
                return Pop::Shutdown;
            }
            self.ready.wait(&mut items);
        }
    }

    /// Request shutdown and wake every waiter. Idempotent.
    pub fn signal_shutdown(&self) {
        let items = self.items.lock();
        self.exit.store(true, Ordering::Release);
        drop(items);
        self.ready.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}
