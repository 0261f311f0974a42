//! HTTP transport layer for the Freesend client.
//!
//! Provides the transport abstraction the email service sends through, and
//! the `reqwest`-backed implementation used outside of tests.

mod http;

pub use self::http::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection could not be established (refused, DNS, TLS).
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// No response within the request timeout.
    #[error("Timeout after {timeout:?}: {message}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
        /// Underlying cause.
        message: String,
    },

    /// The request failed after the connection was made.
    #[error("Request error: {message}")]
    Request {
        /// Error message.
        message: String,
    },
}

/// Flattens an error and its sources into one line, so that OS-level causes
/// such as "Connection refused" are not hidden behind a generic wrapper.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
