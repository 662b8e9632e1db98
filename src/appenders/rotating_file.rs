//! Rotating file appender
//!
//! Writes records to `<base>` and rolls to `<base>.1`, `<base>.2`, ... once
//! the next record would take the current file past its size cap.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::record::FormattedRecord;
use crate::core::rotation::{RotationPolicy, RotationState};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File sink owned by the worker thread
///
/// # Examples
///
/// ```no_run
/// use async_file_logger::appenders::RotatingFileAppender;
/// use async_file_logger::core::{Appender, FormattedRecord, LogLevel, RotationPolicy};
///
/// let mut appender =
///     RotatingFileAppender::new("/var/log/app.log", RotationPolicy::from_kb(100)).unwrap();
/// appender
///     .append(&FormattedRecord::new(LogLevel::Info, "ready", "2025-01-08 10:30:45"))
///     .unwrap();
/// appender.flush().unwrap();
/// ```
pub struct RotatingFileAppender {
    state: RotationState,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Open `path` for appending; existing content counts toward the cap.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileOpen`] if the file or its parent directory
    /// cannot be created.
    pub fn new<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        // Create parent directory if it doesn't exist
        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LoggerError::file_open(base_path.display().to_string(), e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&base_path)
            .map_err(|e| LoggerError::file_open(base_path.display().to_string(), e))?;

        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::io_operation(
                    "reading log file metadata",
                    format!("Cannot stat '{}'", base_path.display()),
                    e,
                )
            })?
            .len();

        Ok(Self {
            state: RotationState::new(base_path, policy),
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    /// Whether `record` must go to a fresh file.
    ///
    /// An empty file always accepts the next record, so an oversized record
    /// is written whole instead of leaving empty files behind.
    #[must_use]
    pub fn needs_rotation(&self, record: &FormattedRecord) -> bool {
        self.current_size > 0
            && self
                .state
                .policy()
                .should_rotate(self.current_size, record.encoded_len())
    }

    /// Close the current file and open the next one in create+truncate mode.
    ///
    /// The index only advances once the new file is open. On failure the
    /// appender is left without a writer and every later append fails until
    /// it is dropped.
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.state.current_path().display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let next = self.state.next_path();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&next)
            .map_err(|e| LoggerError::file_open(next.display().to_string(), e))?;

        self.state.advance();
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// Bytes written to the current file (including pre-existing content)
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn current_index(&self) -> u64 {
        self.state.current_index()
    }

    /// Path of the file currently receiving records
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.state.current_path()
    }

}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, record: &FormattedRecord) -> Result<()> {
        if self.needs_rotation(record) {
            self.rotate()?;
        }

        let line = record.render_line();
        let writer = self.writer.as_mut().ok_or_else(|| {
            LoggerError::file_open(
                self.state.current_path().display().to_string(),
                std::io::Error::new(std::io::ErrorKind::NotConnected, "no open log file"),
            )
        })?;
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::io_operation(
                "writing log record",
                format!("Failed to write to '{}'", self.state.current_path().display()),
                e,
            )
        })?;
        self.current_size += line.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "flushing log file",
                    format!("Failed to flush '{}'", self.state.current_path().display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            // Best effort flush - ignore errors during drop
            let _ = writer.flush();
        }
    }
}
