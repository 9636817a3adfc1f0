//! Domain Layer - Errors
//!
//! Every failure the store can produce is a flavour of "the store operation
//! failed". Form validation has its own error type.

use thiserror::Error;

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never got a response (network down, CORS, DNS...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("Store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The session token was not accepted
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// An insert that should echo the new row returned nothing
    #[error("Store returned no row for {0}")]
    EmptyResponse(&'static str),

    /// Store URL or anon key missing or malformed
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// True when the failure means the session is no longer usable
    pub fn is_auth_failure(&self) -> bool {
        match self {
            StoreError::Unauthorized(_) => true,
            StoreError::Rejected { status, .. } => *status == 401,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

/// Reasons a task form cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Deadline is required")]
    MissingDeadline,

    #[error("Deadline '{0}' is not a valid date")]
    InvalidDeadline(String),
}
