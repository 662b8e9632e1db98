//! # Async File Logger
//!
//! An in-process asynchronous logger. Application threads format and
//! enqueue records without touching the disk; one background worker writes
//! them, in order, to a size-capped file that rolls over to `<file>.1`,
//! `<file>.2`, and so on.
//!
//! ## Features
//!
//! - **Non-blocking producers**: `log` only takes a short queue lock
//! - **Ordered delivery**: strict FIFO from push to write
//! - **Drain on drop**: every queued record is written before the logger goes away
//! - **Size-based rotation**: checked before every write, never splitting a record
//! - **Console echo**: optional, plus a synchronous `console_log` path
//!
//! ```no_run
//! use async_file_logger::prelude::*;
//! use async_file_logger::info;
//!
//! let logger = Logger::new("log.txt", true, 100);
//! info!(logger, "User {} performed {} in {} seconds.", 42, "login", 3.5)?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        Appender, FormattedRecord, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Renderable, Result, RotationPolicy, TimestampFormat, TimestampProvider,
        WorkerState,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender};
pub use crate::core::{
    format_message, Appender, FormattedRecord, LogLevel, LogQueue, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Pop, Renderable, Result, RotationPolicy,
    RotationState, TimestampFormat, TimestampProvider, WorkerState, DEFAULT_MAX_FILE_SIZE_KB,
};
