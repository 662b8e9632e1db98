//! Core logger types: records, the queue, rotation and the worker

pub mod appender;
pub mod config;
pub mod error;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod rotation;
pub mod timestamp;
pub mod worker;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use format::{format_message, Renderable};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use queue::{LogQueue, Pop};
pub use record::FormattedRecord;
pub use rotation::{RotationPolicy, RotationState, DEFAULT_MAX_FILE_SIZE_KB};
pub use timestamp::{TimestampFormat, TimestampProvider};
pub use worker::WorkerState;
