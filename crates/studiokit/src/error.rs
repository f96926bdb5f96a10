//! Error types for Studio API operations.
//!
//! Errors are categorized for user feedback. Note that a missing group is
//! not an error anywhere in this crate: lookups return `Ok(None)` instead,
//! so callers never have to pick apart message text.

use thiserror::Error;

/// Result type alias for Studio API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (transient)
    Network,
    /// Authentication or authorization rejected by the server
    Auth,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Whether this error category is typically transient.
    ///
    /// The tool itself never retries; this only informs user feedback.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the server URL and your connection, then try again",
            Self::Auth => "Check the API key and that it carries admin privileges",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur talking to the Studio admin API.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure before a response arrived.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message from the failed request
        message: String,
    },

    /// The server rejected the credentials.
    #[error("authentication rejected (HTTP {status})")]
    Unauthorized {
        /// HTTP status code, 401 or 403
        status: u16,
    },

    /// The server answered with an error status.
    #[error("server error (HTTP {status})")]
    Api {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON shape.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Get the error category for user feedback.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Http { .. } => ErrorCategory::Network,
            Error::Unauthorized { .. } => ErrorCategory::Auth,
            Error::Api { .. } | Error::InvalidResponse(_) => ErrorCategory::Other,
        }
    }

    /// Whether this error is typically transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) if code == 401 || code == 403 => {
                Self::Unauthorized { status: code }
            }
            ureq::Error::StatusCode(code) => Self::Api { status: code },
            other => Self::Http {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
