//! Logger metrics for observability
//!
//! Counters for records moving through the pipeline: enqueued by producers,
//! written or failed by the worker, and file rotations performed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline counters
///
/// # Example
///
/// ```
/// use async_file_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_written();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.written(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records pushed onto the queue
    enqueued: AtomicU64,

    /// Records the worker wrote to the file (or console fallback)
    written: AtomicU64,

    /// Records the worker failed to write
    failed: AtomicU64,

    /// Completed file rotations
    rotations: AtomicU64,

    /// Records written synchronously by `console_log`
    console_writes: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            console_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_writes(&self) -> u64 {
        self.console_writes.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_write(&self) -> u64 {
        self.console_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Records still in flight (enqueued but neither written nor failed)
    pub fn pending(&self) -> u64 {
        self.enqueued()
            .saturating_sub(self.written() + self.failed())
    }

    /// Write failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if the worker has not processed anything yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            written: AtomicU64::new(self.written()),
            failed: AtomicU64::new(self.failed()),
            rotations: AtomicU64::new(self.rotations()),
            console_writes: AtomicU64::new(self.console_writes()),
        }
    }
}
