//! Main logger implementation
//!
//! Callers format and enqueue; a single background worker writes. The
//! `Logger` is an explicitly owned value: create it where the application
//! starts, hand out `&Logger` (or an `Arc<Logger>`), and let it drop where
//! the application ends. Dropping drains the queue before returning.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    format::{format_args_dyn, Renderable},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    queue::LogQueue,
    record::FormattedRecord,
    rotation::{RotationPolicy, DEFAULT_MAX_FILE_SIZE_KB},
    timestamp::{TimestampFormat, TimestampProvider},
    worker::{Shared, Worker, WorkerState},
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

pub struct Logger {
    queue: Arc<LogQueue>,
    shared: Arc<Shared>,
    timestamps: Arc<dyn TimestampProvider>,
    console: ConsoleAppender,
    console_output: bool,
    path: PathBuf,
    worker: Option<JoinHandle<()>>,
}

impl Logger {
    /// Create a logger writing to `filename`.
    ///
    /// If the file cannot be opened the logger degrades to console-only
    /// output instead of failing; check [`is_degraded`](Self::is_degraded).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use async_file_logger::{Logger, LogLevel};
    ///
    /// let logger = Logger::new("log.txt", true, 100);
    /// logger.log(LogLevel::Info, "starting func {}", &[&"server"]).unwrap();
    /// ```
    #[must_use]
    pub fn new(filename: impl Into<PathBuf>, console_output: bool, max_file_size_kb: u64) -> Self {
        Self::builder()
            .filename(filename)
            .console_output(console_output)
            .max_file_size_kb(max_file_size_kb)
            .build()
    }

    /// Create a degrading logger from a configuration.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        LoggerBuilder::from_config(config).build()
    }

    /// Create a logger, surfacing a file open failure instead of degrading.
    pub fn try_with_config(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).try_build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn start(
        config: &LoggerConfig,
        file: Option<RotatingFileAppender>,
        timestamps: Arc<dyn TimestampProvider>,
    ) -> Result<Self> {
        let queue = Arc::new(LogQueue::new());
        let shared = Arc::new(Shared::new());
        let console = ConsoleAppender::with_colors(config.use_colors);
        let echo = config.console_output.then(|| console.clone());

        let worker = Worker::new(
            Arc::clone(&queue),
            Arc::clone(&shared),
            file,
            echo,
            console.clone(),
        )
        .spawn()?;

        Ok(Self {
            queue,
            shared,
            timestamps,
            console,
            console_output: config.console_output,
            path: config.filename.clone(),
            worker: Some(worker),
        })
    }

    fn record(
        &self,
        level: LogLevel,
        template: &str,
        args: &[&dyn Renderable],
    ) -> Result<FormattedRecord> {
        let message = format_args_dyn(template, args)?;
        Ok(FormattedRecord::new(level, message, self.timestamps.timestamp()))
    }

    /// Format `template` with `args` and enqueue the record.
    ///
    /// Returns as soon as the record is queued; file I/O happens on the
    /// worker thread. A placeholder/argument mismatch is returned here and
    /// nothing is queued.
    ///
    /// Prefer the [`log!`](crate::log) family of macros, which build the
    /// argument slice from plain expressions.
    ///
    /// Once the worker has stopped, records are still accepted but never
    /// written; they stay in memory until the `Logger` is dropped.
    pub fn log(&self, level: LogLevel, template: &str, args: &[&dyn Renderable]) -> Result<()> {
        let record = self.record(level, template, args)?;
        self.enqueue(record);
        Ok(())
    }

    /// Enqueue an already rendered message. `{}` is not interpreted.
    ///
    /// Like [`log`](Self::log), a call after the worker stopped only grows
    /// the queue.
    pub fn log_message(&self, level: LogLevel, message: impl AsRef<str>) {
        let record = FormattedRecord::new(level, message, self.timestamps.timestamp());
        self.enqueue(record);
    }

    fn enqueue(&self, record: FormattedRecord) {
        self.shared.metrics.record_enqueued();
        self.queue.push(record);
    }

    /// Format and write straight to the console on the caller's thread.
    ///
    /// Bypasses the queue, so ordering relative to [`log`](Self::log)
    /// output is not defined.
    pub fn console_log(
        &self,
        level: LogLevel,
        template: &str,
        args: &[&dyn Renderable],
    ) -> Result<()> {
        let record = self.record(level, template, args)?;
        self.console.write_record(&record)?;
        self.shared.metrics.record_console_write();
        Ok(())
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log_message(LogLevel::Info, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log_message(LogLevel::Debug, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log_message(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log_message(LogLevel::Error, message);
    }

    /// Ask the worker to drain and stop without waiting for it. Idempotent.
    ///
    /// The worker reports [`WorkerState::Draining`] from this point on.
    /// Records logged after this call are best-effort: they are written only
    /// if the worker has not already seen the queue empty.
    pub fn signal_shutdown(&self) {
        self.queue.signal_shutdown();
        self.shared.begin_draining();
    }

    /// Signal shutdown and block until every queued record is written.
    ///
    /// There is no timeout. Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        self.signal_shutdown();

        if let Some(handle) = self.worker.take() {
            if let Err(e) = handle.join() {
                eprintln!(
                    "[LOGGER CRITICAL] Worker thread panicked during shutdown: {:?}",
                    e
                );
            }
            self.shared.set_state(WorkerState::Stopped);

            let pending = self.queue.len();
            if pending > 0 {
                eprintln!(
                    "[LOGGER WARNING] {} record(s) logged after shutdown were not written",
                    pending
                );
            }
        }
    }

    pub fn worker_state(&self) -> WorkerState {
        self.shared.state()
    }

    /// True once output has fallen back to the console only
    pub fn is_degraded(&self) -> bool {
        self.shared.is_degraded()
    }

    /// The file error that caused degradation, if any. Returned once.
    pub fn take_sink_error(&self) -> Option<LoggerError> {
        self.shared.take_sink_error()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Records waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Base file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn console_output(&self) -> bool {
        self.console_output
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use async_file_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .filename("logs/app.log")
///     .console_output(true)
///     .max_file_size_kb(512)
///     .timestamp_format(TimestampFormat::Iso8601)
///     .try_build()
///     .expect("log file should be writable");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    timestamps: Option<Arc<dyn TimestampProvider>>,
}

impl LoggerBuilder {
    /// Defaults: `log.txt`, no console echo, 100 KB per file
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::new("log.txt"))
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            timestamps: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.config.filename = filename.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_output(mut self, enabled: bool) -> Self {
        self.config.console_output = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_file_size_kb(mut self, max_file_size_kb: u64) -> Self {
        self.config.max_file_size_kb = max_file_size_kb;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, enabled: bool) -> Self {
        self.config.use_colors = enabled;
        self
    }

    /// Replace the clock; overrides [`timestamp_format`](Self::timestamp_format).
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_provider<P: TimestampProvider + 'static>(mut self, provider: P) -> Self {
        self.timestamps = Some(Arc::new(provider));
        self
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    fn provider(&mut self) -> Arc<dyn TimestampProvider> {
        match self.timestamps.take() {
            Some(provider) => provider,
            None => Arc::new(self.config.timestamp_format.clone()),
        }
    }

    /// Build the Logger, degrading to console-only output if the log file
    /// cannot be opened.
    ///
    /// # Panics
    ///
    /// Panics if the worker thread cannot be spawned, as `std::thread::spawn`
    /// does.
    pub fn build(mut self) -> Logger {
        let timestamps = self.provider();
        let file = match self.open_file() {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("[LOGGER WARNING] {}. Logging to console only.", e);
                return self.start_degraded(timestamps, e);
            }
        };

        match Logger::start(&self.config, file, timestamps) {
            Ok(logger) => logger,
            Err(e) => panic!("failed to spawn logger worker thread: {}", e),
        }
    }

    /// Build the Logger, returning the file open (or thread spawn) error.
    pub fn try_build(mut self) -> Result<Logger> {
        let timestamps = self.provider();
        let file = self.open_file()?;
        Logger::start(&self.config, Some(file), timestamps)
    }

    fn open_file(&self) -> Result<RotatingFileAppender> {
        self.config.validate()?;
        RotatingFileAppender::new(&self.config.filename, self.rotation_policy())
    }

    fn rotation_policy(&self) -> RotationPolicy {
        self.config.rotation_policy()
    }

    fn start_degraded(self, timestamps: Arc<dyn TimestampProvider>, error: LoggerError) -> Logger {
        let logger = match Logger::start(&self.config, None, timestamps) {
            Ok(logger) => logger,
            Err(e) => panic!("failed to spawn logger worker thread: {}", e),
        };
        logger.shared.degrade(error);
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Logger {
    /// `log.txt`, no console echo, 100 KB per file
    fn default() -> Self {
        Self::new("log.txt", false, DEFAULT_MAX_FILE_SIZE_KB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct FixedClock;

    impl TimestampProvider for FixedClock {
        fn timestamp(&self) -> String {
            "T".to_string()
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = LoggerBuilder::default();
        assert_eq!(builder.config().filename, PathBuf::from("log.txt"));
        assert!(!builder.config().console_output);
        assert_eq!(builder.config().max_file_size_kb, 100);
    }

    #[test]
    fn test_log_is_written_after_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");

        let logger = Logger::builder()
            .filename(&path)
            .timestamp_provider(FixedClock)
            .try_build()
            .unwrap();
        logger.log(LogLevel::Info, "starting func {}", &[&"server"]).unwrap();
        logger.warn("plain {} message");
        drop(logger);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[T] [INFO] starting func server\n[T] [WARN] plain {} message\n"
        );
    }

    #[test]
    fn test_format_error_is_not_queued() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");

        let logger = Logger::builder().filename(&path).try_build().unwrap();
        let err = logger.log(LogLevel::Error, "{}, {}", &[&1]).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(logger.metrics().enqueued(), 0);

        let err = logger.console_log(LogLevel::Error, "{}", &[]).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(logger.metrics().console_writes(), 0);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut logger = Logger::builder()
            .filename(dir.path().join("app.log"))
            .try_build()
            .unwrap();

        logger.info("before shutdown");
        logger.signal_shutdown();
        logger.signal_shutdown();
        logger.shutdown();
        logger.shutdown();

        assert_eq!(logger.worker_state(), WorkerState::Stopped);
        assert_eq!(logger.metrics().written(), 1);
    }

    #[test]
    fn test_signal_shutdown_enters_draining() {
        let dir = tempdir().unwrap();
        let mut logger = Logger::builder()
            .filename(dir.path().join("drain.log"))
            .timestamp_provider(FixedClock)
            .try_build()
            .unwrap();
        assert_eq!(logger.worker_state(), WorkerState::Running);

        for i in 0..20_000 {
            logger.log_message(LogLevel::Info, format!("backlog {}", i));
        }
        logger.signal_shutdown();
        let state = logger.worker_state();
        let still_queued = logger.queued();

        // Nothing is pushed after the signal, so a non-empty queue now means
        // the worker had not stopped when the state was read.
        if still_queued > 0 {
            assert_eq!(state, WorkerState::Draining);
        } else {
            assert_ne!(state, WorkerState::Running);
        }

        logger.shutdown();
        assert_eq!(logger.worker_state(), WorkerState::Stopped);
        assert_eq!(logger.metrics().written(), 20_000);
    }

    #[test]
    fn test_signal_shutdown_leaves_running_when_idle() {
        let dir = tempdir().unwrap();
        let mut logger = Logger::builder()
            .filename(dir.path().join("idle.log"))
            .try_build()
            .unwrap();

        logger.signal_shutdown();
        assert_ne!(logger.worker_state(), WorkerState::Running);
        logger.shutdown();
        assert_eq!(logger.worker_state(), WorkerState::Stopped);
    }

    #[test]
    fn test_try_build_surfaces_open_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let result = Logger::builder().filename(blocker.join("app.log")).try_build();
        assert!(matches!(result, Err(LoggerError::FileOpen { .. })));
    }

    #[test]
    fn test_build_degrades_to_console() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let mut logger = Logger::builder()
            .filename(blocker.join("app.log"))
            .use_colors(false)
            .build();
        assert!(logger.is_degraded());
        assert!(matches!(
            logger.take_sink_error(),
            Some(LoggerError::FileOpen { .. })
        ));

        logger.info("still delivered");
        logger.shutdown();
        assert_eq!(logger.metrics().written(), 1);
    }

    #[test]
    fn test_console_log_bypasses_queue() {
        let dir = tempdir().unwrap();
        let logger = Logger::builder()
            .filename(dir.path().join("app.log"))
            .use_colors(false)
            .try_build()
            .unwrap();

        logger
            .console_log(LogLevel::Warn, "visible {}", &[&"now"])
            .unwrap();
        assert_eq!(logger.metrics().console_writes(), 1);
        assert_eq!(logger.metrics().enqueued(), 0);
    }
}
