//! Client error types.
//!
//! Only transport-level faults surface here; failures the API itself reports
//! arrive as [`Envelope::Failure`](crate::Envelope) values, not errors.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be completed (DNS, connection, timeout,
    /// body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body could not be parsed as an envelope, or the parsed
    /// envelope violated the success/failure invariant.
    #[error("Protocol error (HTTP {status}): {message}")]
    Protocol {
        /// HTTP status code of the offending response.
        status: u16,
        /// What was wrong with the body.
        message: String,
    },

    /// The request was structurally invalid and was never sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a protocol error from an HTTP status and an underlying cause.
    pub(crate) fn protocol(status: reqwest::StatusCode, cause: impl std::fmt::Display) -> Self {
        Error::Protocol {
            status: status.as_u16(),
            message: cause.to_string(),
        }
    }

    /// Check if this error was caused by a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Check if this error was caused by a failure to connect.
    pub fn is_connect(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_connect())
    }

    /// Check if this is a protocol error (unparseable or malformed envelope).
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol { .. })
    }

    /// Check if this is a pre-flight request validation error.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
