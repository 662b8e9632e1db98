//! Timestamp generation
//!
//! Records are stamped on the caller's thread when they are built, so the
//! provider must be cheap and shareable across threads.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// strftime layout used by [`TimestampFormat::Local`]
pub const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the timestamp string attached to every record
pub trait TimestampProvider: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Timestamp layouts backed by the system clock
///
/// # Examples
///
/// ```
/// use async_file_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&at), "2025-01-08T10:30:45.000Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall-clock time: `2025-01-08 10:30:45`
    #[default]
    Local,

    /// ISO 8601 UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// An invalid specifier falls back to the [`LOCAL_FORMAT`] layout
    /// instead of failing the log call.
    Custom(String),
}

impl TimestampFormat {
    /// Format `datetime` according to this layout
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimestampFormat::Local => datetime.format(LOCAL_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    out = datetime.format(LOCAL_FORMAT).to_string();
                }
                out
            }
        }
    }
}

impl TimestampProvider for TimestampFormat {
    fn timestamp(&self) -> String {
        self.format(&Local::now())
    }
}
