//! Logging macros for heterogeneous `{}` arguments.
//!
//! Each argument is borrowed as a `&dyn Renderable`, so any `Display` type
//! can be mixed freely. The macros evaluate to the `Result<()>` returned by
//! [`Logger::log`](crate::Logger::log) or
//! [`Logger::console_log`](crate::Logger::console_log).
//!
//! # Examples
//!
//! ```no_run
//! use async_file_logger::prelude::*;
//! use async_file_logger::info;
//!
//! let logger = Logger::new("log.txt", false, 100);
//!
//! info!(logger, "Server started")?;
//!
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {} performed {} in {} seconds.", user_id, action, 3.5)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Format and enqueue a record at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use async_file_logger::prelude::*;
/// # let logger = Logger::new("log.txt", false, 100);
/// use async_file_logger::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $level,
            $template,
            &[$(&$arg as &dyn $crate::Renderable),*],
        )
    };
}

/// Format and write a record synchronously to the console.
///
/// # Examples
///
/// ```no_run
/// # use async_file_logger::prelude::*;
/// # let logger = Logger::new("log.txt", false, 100);
/// use async_file_logger::console_log;
/// console_log!(logger, LogLevel::Warn, "Disk {} at {}%", "/dev/sda1", 97)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! console_log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.console_log(
            $level,
            $template,
            &[$(&$arg as &dyn $crate::Renderable),*],
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```no_run
/// # use async_file_logger::prelude::*;
/// # let logger = Logger::new("log.txt", false, 100);
/// use async_file_logger::info;
/// info!(logger, "Application started")?;
/// info!(logger, "Processing {} items", 100)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
