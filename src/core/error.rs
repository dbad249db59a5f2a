//! Error types for the log file system

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The operation needs the file on disk and auto-create is off
    #[error("Log file '{path}' does not exist")]
    MissingFile { path: String },

    /// The operation needs the stream closed and auto-close is off
    #[error("Log file '{path}' has an open stream")]
    StreamOpen { path: String },

    /// The operation needs an open stream and auto-open is off
    #[error("Log file '{path}' is not open")]
    NotOpen { path: String },

    /// A caller-supplied option failed its type check
    #[error("Invalid option '{option}': expected {expected}, found {found}")]
    InvalidOption {
        option: String,
        expected: String,
        found: String,
    },

    /// IO error with context
    #[error("IO error while {operation} '{path}': {source}")]
    IoOperation {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An observer rejected a notification
    #[error("Observer rejected '{event}': {message}")]
    Observer { event: String, message: String },
}

impl LoggerError {
    /// Create a missing file error
    pub fn missing_file(path: &Path) -> Self {
        LoggerError::MissingFile {
            path: path.display().to_string(),
        }
    }

    /// Create a stream open error
    pub fn stream_open(path: &Path) -> Self {
        LoggerError::StreamOpen {
            path: path.display().to_string(),
        }
    }

    /// Create a not open error
    pub fn not_open(path: &Path) -> Self {
        LoggerError::NotOpen {
            path: path.display().to_string(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        option: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        LoggerError::InvalidOption {
            option: option.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, path: &Path, source: std::io::Error) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an observer error, typically returned from a "before" hook to veto
    pub fn observer(event: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Observer {
            event: event.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::missing_file(Path::new("/var/log/app.log"));
        assert!(matches!(err, LoggerError::MissingFile { .. }));

        let err = LoggerError::stream_open(Path::new("/var/log/app.log"));
        assert!(matches!(err, LoggerError::StreamOpen { .. }));

        let err = LoggerError::invalid_option("autoCreate", "boolean", "string");
        assert!(matches!(err, LoggerError::InvalidOption { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::not_open(Path::new("/var/log/app.log"));
        assert_eq!(err.to_string(), "Log file '/var/log/app.log' is not open");

        let err = LoggerError::invalid_option("truncate", "boolean", "number");
        assert_eq!(
            err.to_string(),
            "Invalid option 'truncate': expected boolean, found number"
        );

        let err = LoggerError::observer("beforeWrite", "read-only mode");
        assert_eq!(err.to_string(), "Observer rejected 'beforeWrite': read-only mode");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening", Path::new("/var/log/app.log"), io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening"));
        assert!(err.to_string().contains("access denied"));
    }
}
