//! Error types for the notes client.

use echo_core::ValidationErrors;
use thiserror::Error;

/// Fallback text when a failed request carried no server message.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client and its controllers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-2xx response, undecodable body, or transport failure.
    ///
    /// `status` is `None` when no response was received at all.
    #[error("request failed: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    RequestFailed {
        status: Option<u16>,
        message: Option<String>,
    },

    /// A draft broke a local rule and was never sent.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationErrors),
}

impl ClientError {
    /// Failure with a status code and, if the server sent one, its message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        Self::RequestFailed {
            status: Some(status),
            message,
        }
    }

    /// Failure before any response arrived (DNS, connect, reset, timeout).
    pub fn transport(err: &reqwest::Error) -> Self {
        tracing::warn!(error = %err, "notes request did not complete");
        Self::RequestFailed {
            status: None,
            message: None,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::ValidationFailed(_) => None,
        }
    }

    /// The server-supplied message, or `fallback` when there is none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::RequestFailed {
                message: Some(message),
                ..
            } => message,
            _ => fallback,
        }
    }
}
