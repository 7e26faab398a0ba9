//! Error types for remote service calls and session actions.

use thiserror::Error;

/// A failed call to one of the remote endpoints.
///
/// No call is retried; the user re-invokes the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The endpoint answered with a non-success status.
    #[error("{endpoint} request failed with status {status}")]
    Status {
        /// Endpoint name (`persons`, `graph`, `share`).
        endpoint: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response not received.
    #[error("{endpoint} request failed: {message}")]
    Transport {
        /// Endpoint name.
        endpoint: &'static str,
        /// Description of the transport failure.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("{endpoint} response could not be decoded: {message}")]
    Decode {
        /// Endpoint name.
        endpoint: &'static str,
        /// Description of the decoding failure.
        message: String,
    },
}

impl ServiceError {
    /// The endpoint the failed call went to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Status { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// Reasons a selection change is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The token is already selected.
    #[error("'{0}' is already selected")]
    Duplicate(String),

    /// The selection holds the maximum number of tokens.
    #[error("at most {limit} selections are allowed")]
    Full {
        /// The selection limit.
        limit: usize,
    },

    /// A search phrase was empty after trimming.
    #[error("search phrase is empty")]
    EmptyPhrase,
}
