//! Custom error types for budget-pulse
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The analytics core never returns these;
//! they cover configuration, storage, validation and backend traffic.

use thiserror::Error;

/// The main error type for budget-pulse operations
#[derive(Error, Debug)]
pub enum PulseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// The backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level HTTP failures (connection refused, timeouts, bad bodies)
    #[error("HTTP error: {0}")]
    Http(String),

    /// An operation needed a session but none is stored
    #[error("User not logged in")]
    NotLoggedIn,

    /// The backend rejected the stored token (401/403)
    #[error("Session expired. Please login again.")]
    SessionExpired,
}

impl PulseError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Errors after which the stored session should be discarded
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Transient conditions the user can simply retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for PulseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<csv::Error> for PulseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for budget-pulse operations
pub type PulseResult<T> = Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PulseError::budget_not_found("b-42");
        assert_eq!(err.to_string(), "Budget not found: b-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_api_error_display() {
        let err = PulseError::Api {
            status: 422,
            message: "percentage must be a number".into(),
        };
        assert_eq!(
            err.to_string(),
            "Backend error (422): percentage must be a number"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable() {
        assert!(PulseError::Http("connection refused".into()).is_retryable());
        assert!(PulseError::Api {
            status: 503,
            message: "down".into()
        }
        .is_retryable());
        assert!(!PulseError::SessionExpired.is_retryable());
        assert!(PulseError::SessionExpired.is_auth_failure());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PulseError = io_err.into();
        assert!(matches!(err, PulseError::Io(_)));
    }
}
