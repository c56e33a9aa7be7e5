//! Error types for the commit-info output plugin
//!
//! Option parsing is the only failure path of the plugin itself. The remaining
//! variants belong to the replay host that stands in for the decoding engine
//! and the transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error categories for logging and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Plugin option errors (unknown option, unparsable value)
    Configuration,
    /// Callback ordering errors detected by the host
    Protocol,
    /// Transport errors while delivering output
    Io,
    /// Replay script decoding errors
    Serialization,
}

/// Commit-info errors
#[derive(Error, Debug)]
pub enum CommitInfoError {
    /// A recognized option carried a value of the wrong type
    #[error("could not parse value \"{value}\" for parameter \"{name}\"")]
    InvalidParameter { name: String, value: String },

    /// An unrecognized option name was supplied
    #[error("option \"{name}\" = \"{}\" is unknown", .value.as_deref().unwrap_or("(null)"))]
    UnknownParameter { name: String, value: Option<String> },

    /// The host drove the callbacks out of order
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A replay script line could not be decoded
    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommitInfoError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(name: impl Into<String>, value: Option<&str>) -> Self {
        Self::UnknownParameter {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a script error for a 1-based line number
    pub fn script(line: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: msg.into(),
        }
    }

    /// Get the error category for logging and alerting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParameter { .. } | Self::UnknownParameter { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidState(_) => ErrorCategory::Protocol,
            Self::Io(_) => ErrorCategory::Io,
            Self::Script { .. } | Self::Json(_) => ErrorCategory::Serialization,
        }
    }

    /// Get a metric-safe error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::UnknownParameter { .. } => "unknown_parameter",
            Self::InvalidState(_) => "invalid_state",
            Self::Script { .. } => "script_error",
            Self::Json(_) => "json_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Result type for commit-info operations
pub type Result<T> = std::result::Result<T, CommitInfoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = CommitInfoError::invalid_parameter("skip-empty-xacts", "notabool");
        assert_eq!(
            err.to_string(),
            "could not parse value \"notabool\" for parameter \"skip-empty-xacts\""
        );
    }

    #[test]
    fn test_unknown_parameter_display() {
        let err = CommitInfoError::unknown_parameter("foo", Some("bar"));
        assert_eq!(err.to_string(), "option \"foo\" = \"bar\" is unknown");

        let err = CommitInfoError::unknown_parameter("foo", None);
        assert_eq!(err.to_string(), "option \"foo\" = \"(null)\" is unknown");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            CommitInfoError::invalid_parameter("a", "b").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            CommitInfoError::unknown_parameter("a", None).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            CommitInfoError::invalid_state("x").category(),
            ErrorCategory::Protocol
        );
        assert_eq!(
            CommitInfoError::script(3, "x").category(),
            ErrorCategory::Serialization
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert_eq!(CommitInfoError::from(io).category(), ErrorCategory::Io);
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            CommitInfoError::invalid_parameter("a", "b").error_code(),
            "invalid_parameter"
        );
        assert_eq!(
            CommitInfoError::unknown_parameter("a", None).error_code(),
            "unknown_parameter"
        );
        assert_eq!(CommitInfoError::invalid_state("x").error_code(), "invalid_state");
        assert_eq!(CommitInfoError::script(1, "x").error_code(), "script_error");
    }

    #[test]
    fn test_script_error_display() {
        let err = CommitInfoError::script(7, "missing field `xid`");
        assert_eq!(err.to_string(), "Script error at line 7: missing field `xid`");
    }
}
