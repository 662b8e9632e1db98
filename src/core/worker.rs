//! Background worker: the single consumer of the log queue
//!
//! State machine: `Running` until shutdown is signalled, `Draining` while
//! records queued before (or racing with) shutdown are written, `Stopped`
//! once the queue reports shutdown with nothing left. Every run passes
//! through `Draining`, even when the queue is already empty.

use super::appender::Appender;
use super::error::LoggerError;
use super::metrics::LoggerMetrics;
use super::queue::{LogQueue, Pop};
use super::record::FormattedRecord;
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Thread name given to the worker
pub const WORKER_THREAD_NAME: &str = "async-file-logger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WorkerState {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Running,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Running => "running",
            WorkerState::Draining => "draining",
            WorkerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// State shared between the owning `Logger` and its worker
#[derive(Debug)]
pub(crate) struct Shared {
    state: AtomicU8,
    degraded: AtomicBool,
    sink_error: Mutex<Option<LoggerError>>,
    pub(crate) metrics: LoggerMetrics,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(WorkerState::Running as u8),
            degraded: AtomicBool::new(false),
            sink_error: Mutex::new(None),
            metrics: LoggerMetrics::new(),
        }
    }

    pub(crate) fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Running -> Draining; never moves a stopped worker backwards.
    pub(crate) fn begin_draining(&self) {
        let _ = self.state.compare_exchange(
            WorkerState::Running as u8,
            WorkerState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub(crate) fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Switch to console-only output, keeping the first error for the owner.
    pub(crate) fn degrade(&self, error: LoggerError) {
        self.degraded.store(true, Ordering::Release);
        let mut slot = self.sink_error.lock();
        if slot.is_none() {
            *slot = Some(error);
        }
    }

    pub(crate) fn take_sink_error(&self) -> Option<LoggerError> {
        self.sink_error.lock().take()
    }
}

pub(crate) struct Worker {
    queue: Arc<LogQueue>,
    shared: Arc<Shared>,
    file: Option<RotatingFileAppender>,
    echo: Option<ConsoleAppender>,
    fallback: ConsoleAppender,
}

impl Worker {
    pub(crate) fn new(
        queue: Arc<LogQueue>,
        shared: Arc<Shared>,
        file: Option<RotatingFileAppender>,
        echo: Option<ConsoleAppender>,
        fallback: ConsoleAppender,
    ) -> Self {
        Self {
            queue,
            shared,
            file,
            echo,
            fallback,
        }
    }

    pub(crate) fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || self.run())
    }

    fn run(mut self) {
        loop {
            match self.queue.pop_blocking() {
                Pop::Record(record) => {
                    if self.queue.is_shutdown() {
                        self.shared.begin_draining();
                    }
                    self.write(&record);
                }
                Pop::Shutdown => {
                    self.shared.begin_draining();
                    break;
                }
            }
        }

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush() {
                eprintln!("[LOGGER ERROR] Final flush of {} failed: {}", file.name(), e);
            }
        }
        self.shared.set_state(WorkerState::Stopped);
    }

    fn write(&mut self, record: &FormattedRecord) {
        let metrics = &self.shared.metrics;

        if let Some(file) = self.file.as_mut() {
            let index_before = file.current_index();
            let result = file.append(record).and_then(|()| file.flush());
            if file.current_index() != index_before {
                metrics.record_rotation();
            }

            match result {
                Ok(()) => {
                    metrics.record_written();
                    if let Some(echo) = &self.echo {
                        if let Err(e) = echo.write_record(record) {
                            eprintln!("[LOGGER ERROR] Console echo failed: {}", e);
                        }
                    }
                    return;
                }
                Err(e @ LoggerError::FileOpen { .. }) => {
                    eprintln!(
                        "[LOGGER CRITICAL] {}. Falling back to console-only output.",
                        e
                    );
                    self.file = None;
                    self.shared.degrade(e);
                    // Fall through so this record reaches the console.
                }
                Err(e) => {
                    eprintln!("[LOGGER ERROR] Appender {} failed: {}", file.name(), e);
                    metrics.record_failed();
                    return;
                }
            }
        }

        let console = self.echo.as_ref().unwrap_or(&self.fallback);
        match console.write_record(record) {
            Ok(()) => {
                metrics.record_written();
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Console fallback failed: {}", e);
                metrics.record_failed();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::rotation::RotationPolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_state_transitions() {
        let shared = Shared::new();
        assert_eq!(shared.state(), WorkerState::Running);
        shared.begin_draining();
        assert_eq!(shared.state(), WorkerState::Draining);
        shared.set_state(WorkerState::Stopped);
        shared.begin_draining();
        assert_eq!(shared.state(), WorkerState::Stopped);
    }

    #[test]
    fn test_degrade_keeps_first_error() {
        let shared = Shared::new();
        shared.degrade(LoggerError::config("a", "first"));
        shared.degrade(LoggerError::config("b", "second"));
        assert!(shared.is_degraded());
        let err = shared.take_sink_error().unwrap();
        assert!(err.to_string().contains("first"));
        assert!(shared.take_sink_error().is_none());
    }

    #[test]
    fn test_worker_drains_then_stops() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("worker.log");
        let queue = Arc::new(LogQueue::new());
        let shared = Arc::new(Shared::new());
        let file = RotatingFileAppender::new(&path, RotationPolicy::default()).unwrap();

        for i in 0..20 {
            queue.push(FormattedRecord::new(LogLevel::Info, format!("r{}", i), "ts"));
        }
        queue.signal_shutdown();

        let handle = Worker::new(
            Arc::clone(&queue),
            Arc::clone(&shared),
            Some(file),
            None,
            ConsoleAppender::with_colors(false),
        )
        .spawn()
        .unwrap();
        handle.join().unwrap();

        assert_eq!(shared.state(), WorkerState::Stopped);
        assert_eq!(shared.metrics.written(), 20);
        let content = fs::read_to_string(&path).unwrap();
        let expected: Vec<String> = (0..20).map(|i| format!("[ts] [INFO] r{}", i)).collect();
        assert_eq!(content.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_worker_without_file_uses_console() {
        let queue = Arc::new(LogQueue::new());
        let shared = Arc::new(Shared::new());
        queue.push(FormattedRecord::new(LogLevel::Warn, "console only", "ts"));
        queue.signal_shutdown();

        Worker::new(
            Arc::clone(&queue),
            Arc::clone(&shared),
            None,
            None,
            ConsoleAppender::with_colors(false),
        )
        .spawn()
        .unwrap()
        .join()
        .unwrap();

        assert_eq!(shared.metrics.written(), 1);
        assert_eq!(shared.metrics.failed(), 0);
    }
}
