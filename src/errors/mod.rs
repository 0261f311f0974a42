//! Error types for the Freesend client.
//!
//! Every failure a send can produce falls into exactly one of four kinds:
//! local validation, network, API, or unexpected. Configuration errors are
//! only raised while a client is being constructed.

use thiserror::Error;

/// Result type alias for Freesend operations.
pub type FreesendResult<T> = Result<T, FreesendError>;

/// Error type for Freesend client operations.
#[derive(Debug, Error)]
pub enum FreesendError {
    /// The request was rejected locally and never left the process.
    #[error("Validation error: {message}")]
    Validation {
        /// Reason naming the violated rule.
        message: String,
        /// The offending field, when a single field is at fault.
        field: Option<String>,
    },

    /// No interpretable HTTP response was obtained.
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// A response was received but it indicates failure.
    #[error("API error: {message}")]
    Api {
        /// Server-supplied or diagnostic message.
        message: String,
        /// HTTP status code, absent when the body could not be interpreted.
        status_code: Option<u16>,
    },

    /// Any failure not classified above.
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// Description of the underlying cause.
        message: String,
    },

    /// Invalid client configuration (missing API key, malformed base URL).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },
}

impl FreesendError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FreesendError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a validation error attributed to a field.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        FreesendError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        FreesendError::Network {
            message: message.into(),
        }
    }

    /// Creates an API error carrying an HTTP status code.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        FreesendError::Api {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Creates an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        FreesendError::Unexpected {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        FreesendError::Configuration {
            message: message.into(),
        }
    }

    /// Returns the bare message, without the kind prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            FreesendError::Validation { message, .. }
            | FreesendError::Network { message }
            | FreesendError::Api { message, .. }
            | FreesendError::Unexpected { message }
            | FreesendError::Configuration { message } => message,
        }
    }

    /// Returns the HTTP status code for API errors that carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FreesendError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Returns the offending field for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            FreesendError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Returns true if a caller could reasonably retry the same request.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FreesendError::Network { .. })
    }
}

impl From<serde_json::Error> for FreesendError {
    fn from(err: serde_json::Error) -> Self {
        FreesendError::Unexpected {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for FreesendError {
    fn from(err: url::ParseError) -> Self {
        FreesendError::Configuration {
            message: format!("Invalid base URL: {}", err),
        }
    }
}
