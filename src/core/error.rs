//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Template placeholder count does not match the argument count
    #[error(
        "Format error: template {template:?} has {placeholders} placeholder(s) but {arguments} argument(s) were supplied"
    )]
    PlaceholderMismatch {
        template: String,
        placeholders: usize,
        arguments: usize,
    },

    /// An argument could not be rendered to a string
    #[error("Format error: argument #{index} could not be rendered: {message}")]
    Render { index: usize, message: String },

    /// The log file (or a rotation target) could not be opened
    #[error("Failed to open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a placeholder mismatch error
    pub fn placeholder_mismatch(
        template: impl Into<String>,
        placeholders: usize,
        arguments: usize,
    ) -> Self {
        LoggerError::PlaceholderMismatch {
            template: template.into(),
            placeholders,
            arguments,
        }
    }

    /// Create an argument render error
    pub fn render(index: usize, message: impl Into<String>) -> Self {
        LoggerError::Render {
            index,
            message: message.into(),
        }
    }

    /// Create a file open error
    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to the formatting family
    ///
    /// Formatting errors are raised synchronously on the caller's thread
    /// and never reach the queue.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LoggerError::PlaceholderMismatch { .. } | LoggerError::Render { .. }
        )
    }
}
