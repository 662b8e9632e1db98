//! Formatted log record

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// One rendered, timestamped log entry.
///
/// Immutable once built. A record is owned by the queue until the worker
/// pops it, and by the worker for the duration of the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRecord {
    level: LogLevel,
    message: String,
    timestamp: String,
}

impl FormattedRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that one record always occupies exactly one line on disk.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>, timestamp: impl Into<String>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: timestamp.into(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `[<timestamp>] [<LEVEL>] <message>` without a line terminator
    pub fn render(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }

    /// The exact line written to the log file, newline included
    pub fn render_line(&self) -> String {
        let mut line = self.render();
        line.push('\n');
        line
    }

    /// Number of bytes [`render_line`](Self::render_line) occupies on disk
    pub fn encoded_len(&self) -> u64 {
        // "[" ts "] [" level "] " msg "\n"
        (1 + self.timestamp.len() + 3 + self.level.to_str().len() + 2 + self.message.len() + 1)
            as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line_layout() {
        let record = FormattedRecord::new(LogLevel::Warn, "disk almost full", "2025-01-08 10:30:45");
        assert_eq!(
            record.render_line(),
            "[2025-01-08 10:30:45] [WARN] disk almost full\n"
        );
    }

    #[test]
    fn test_encoded_len_matches_rendered_bytes() {
        for level in LogLevel::ALL {
            let record = FormattedRecord::new(level, "héllo wörld", "ts");
            assert_eq!(record.encoded_len(), record.render_line().len() as u64);
        }
    }

    #[test]
    fn test_message_is_single_line() {
        let record = FormattedRecord::new(
            LogLevel::Info,
            "User login\nERROR [2024-10-17] Fake error\r\tend",
            "ts",
        );
        assert!(!record.message().contains('\n'));
        assert_eq!(record.message(), "User login\\nERROR [2024-10-17] Fake error\\r\\tend");
        assert_eq!(record.render_line().lines().count(), 1);
    }
}
