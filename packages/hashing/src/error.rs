//! Error handling for the hashing crate

use thiserror::Error;

/// Hashing-specific errors
#[derive(Debug, Error)]
pub enum HashError {
    /// The message description handed to the hash was inconsistent
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The underlying digest produced output of an unexpected shape
    #[error("Hash finalization error: {0}")]
    Finalization(String),
}

impl HashError {
    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
