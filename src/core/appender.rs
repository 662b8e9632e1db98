//! Appender trait for log output destinations

use super::{error::Result, record::FormattedRecord};

/// A sink the worker writes records to.
///
/// Appenders are driven only from the worker thread, so implementations
/// need no internal locking.
pub trait Appender: Send {
    fn append(&mut self, record: &FormattedRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
