//! Error types for Forkful.
//!
//! Upstream failures fall into three kinds: the transport never completed,
//! the server answered with a non-success status, or something else went
//! wrong. All of them travel as one [`ForkfulError`] that exposes a message
//! and an optional status code.

use thiserror::Error;

/// Result type alias using `ForkfulError`.
pub type Result<T> = std::result::Result<T, ForkfulError>;

/// Main error type for all Forkful operations.
#[derive(Debug, Error)]
pub enum ForkfulError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// The transport layer did not complete (DNS, connect, timeout, reset).
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The upstream answered with a non-success status.
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code received
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Anything else, wrapping the original message.
    #[error("Unknown error: {0}")]
    Unknown(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP & INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Requested record does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ForkfulError {
    /// Human-readable message, suitable for showing to a user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Status code of the upstream response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ForkfulError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ForkfulError::NetworkFailure(_) => true,
            ForkfulError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the failure came from talking to the upstream API.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            ForkfulError::NetworkFailure(_)
                | ForkfulError::UpstreamStatus { .. }
                | ForkfulError::Unknown(_)
        )
    }
}
