//! Size-based rotation policy
//!
//! The policy is consulted before every write, never periodically, so a file
//! exceeds its cap by at most one record. The worker is the only writer,
//! which makes the close/advance/open sequence atomic from its point of view.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default cap in kilobytes
pub const DEFAULT_MAX_FILE_SIZE_KB: u64 = 100;

/// Decides when the current file must be rolled over
///
/// # Examples
///
/// ```
/// use async_file_logger::core::RotationPolicy;
///
/// let policy = RotationPolicy::from_kb(1);
/// assert!(!policy.should_rotate(1000, 24));
/// assert!(policy.should_rotate(1000, 25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    max_size_bytes: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::from_kb(DEFAULT_MAX_FILE_SIZE_KB)
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// A cap of `0` rolls before every record written to a non-empty file.
    #[must_use]
    pub fn from_kb(max_file_size_kb: u64) -> Self {
        Self::new(max_file_size_kb.saturating_mul(1024))
    }

    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// True iff appending `incoming_record_size` bytes would push the file
    /// past the cap.
    #[must_use]
    pub fn should_rotate(&self, current_size: u64, incoming_record_size: u64) -> bool {
        current_size.saturating_add(incoming_record_size) > self.max_size_bytes
    }

    /// `base` for index 0, `base.<index>` afterwards
    #[must_use]
    pub fn next_filename(base: &Path, index: u64) -> PathBuf {
        if index == 0 {
            return base.to_path_buf();
        }
        let mut name = base.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }
}

/// Naming state for one logger's sequence of files
///
/// `current_index` only moves forward for the lifetime of the state.
#[derive(Debug, Clone)]
pub struct RotationState {
    base_filename: PathBuf,
    current_index: u64,
    policy: RotationPolicy,
}

impl RotationState {
    pub fn new(base_filename: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            base_filename: base_filename.into(),
            current_index: 0,
            policy,
        }
    }

    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Path of the file currently being written
    pub fn current_path(&self) -> PathBuf {
        RotationPolicy::next_filename(&self.base_filename, self.current_index)
    }

    /// Path the next rotation will open; the index is left unchanged.
    pub fn next_path(&self) -> PathBuf {
        RotationPolicy::next_filename(&self.base_filename, self.current_index + 1)
    }

    /// Move to the next index and return its path.
    pub fn advance(&mut self) -> PathBuf {
        self.current_index += 1;
        self.current_path()
    }
}
