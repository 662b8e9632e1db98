//! Logger configuration

use super::error::{LoggerError, Result};
use super::rotation::{RotationPolicy, DEFAULT_MAX_FILE_SIZE_KB};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_max_file_size_kb() -> u64 {
    DEFAULT_MAX_FILE_SIZE_KB
}

fn default_use_colors() -> bool {
    true
}

/// Construction parameters for a [`Logger`](super::Logger)
///
/// Only `filename` is required when loading from JSON.
///
/// # Example
///
/// ```
/// use async_file_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{ "filename": "log.txt", "console_output": true }"#)
///     .unwrap();
/// assert_eq!(config.max_file_size_kb, 100);
/// assert!(config.console_output);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Base path; rotated files are `<filename>.1`, `<filename>.2`, ...
    pub filename: PathBuf,

    /// Echo every record to the console as well as the file
    #[serde(default)]
    pub console_output: bool,

    /// Size cap per file; `0` puts each record in its own file
    #[serde(default = "default_max_file_size_kb")]
    pub max_file_size_kb: u64,

    #[serde(default)]
    pub timestamp_format: TimestampFormat,

    /// Colourise the level in console output
    #[serde(default = "default_use_colors")]
    pub use_colors: bool,
}

impl LoggerConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            console_output: false,
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
            timestamp_format: TimestampFormat::default(),
            use_colors: default_use_colors(),
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.filename.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "filename must not be empty"));
        }
        if self.filename.file_name().is_none() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("'{}' does not name a file", self.filename.display()),
            ));
        }
        Ok(())
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::from_kb(self.max_file_size_kb)
    }
}
