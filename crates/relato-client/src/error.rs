//! Error types for backend calls.

use thiserror::Error;

/// Errors that can occur talking to the backend.
///
/// The taxonomy matters to the caller: [`ApiError::Network`] means the
/// backend is unreachable and the engine should degrade to offline mode;
/// the other variants mean the backend answered and something else is
/// wrong.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    /// The backend answered 2xx but the body did not parse.
    #[error("invalid response: {0}")]
    ResponseParse(String),
}

impl ApiError {
    /// Returns true when the failure means "backend unreachable" rather
    /// than "backend rejected".
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;
