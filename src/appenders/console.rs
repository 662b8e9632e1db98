//! Console appender implementation

use crate::core::{Appender, FormattedRecord, LogLevel, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Echoes records to the terminal.
///
/// `ERROR` goes to stderr, every other level to stdout. Writing only needs
/// `&self`, so the same appender serves the worker echo and the synchronous
/// `console_log` path.
#[derive(Debug, Clone)]
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Write one record, bypassing any queue.
    pub fn write_record(&self, record: &FormattedRecord) -> Result<()> {
        let line = self.format_text(record);
        match record.level() {
            LogLevel::Error => writeln!(io::stderr().lock(), "{}", line)?,
            _ => writeln!(io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    #[cfg(feature = "console")]
    fn format_text(&self, record: &FormattedRecord) -> String {
        if !self.use_colors {
            return record.render();
        }
        let level = record.level();
        format!(
            "[{}] [{}] {}",
            record.timestamp(),
            level.to_str().color(level.color_code()),
            record.message()
        )
    }

    #[cfg(not(feature = "console"))]
    fn format_text(&self, record: &FormattedRecord) -> String {
        record.render()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &FormattedRecord) -> Result<()> {
        self.write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
