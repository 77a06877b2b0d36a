//! Error types for the designcore engine

use std::io;
use thiserror::Error;

/// Main error type for designcore operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A name or index lookup missed
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was looked up (e.g. "layer", "command")
        kind: &'static str,
        /// The requested name
        name: String,
    },

    /// An index is outside the live collection
    #[error("index {0} out of range")]
    IndexOutOfRange(usize),

    /// A property name is not known for the target item
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    /// A property value has the wrong type or is out of range
    #[error("invalid value for '{property}': {reason}")]
    InvalidValue {
        /// The property that rejected the value
        property: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Attempt to delete or rename a built-in item
    #[error("'{0}' is protected and cannot be deleted or renamed")]
    ProtectedItem(String),

    /// Malformed file input
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source text
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Input token matched no registered command (non-fatal, re-prompt)
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Unsupported DXF version code
    #[error("unsupported DXF version: {0}")]
    UnsupportedVersion(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`]
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a [`CoreError::InvalidValue`]
    pub fn invalid_value(property: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidValue {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CoreError::Parse`]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        CoreError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for designcore operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CoreError::not_found("layer", "WALLS");
        assert_eq!(err.to_string(), "layer 'WALLS' not found");
    }

    #[test]
    fn test_parse_display() {
        let err = CoreError::parse(42, "expected group code");
        assert!(err.to_string().contains("line 42"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
