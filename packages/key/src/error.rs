//! Error handling for key derivation

use paced_hashing::HashError;
use paced_task::TaskError;
use thiserror::Error;

/// Key derivation errors
///
/// Parameter errors are reported synchronously by the engine constructors,
/// before any scheduled work begins.
#[derive(Debug, Error)]
pub enum KdfError {
    /// Iteration count was zero
    #[error("Invalid iteration count: must be at least 1")]
    InvalidIterations,

    /// Requested key length was zero
    #[error("Invalid key length: must be at least 1 byte")]
    InvalidKeyLength,

    /// Requested key needs more blocks than RFC 2898 permits
    #[error("Key length too large: {blocks} blocks exceeds the limit of 2^32 - 1")]
    KeyLengthTooLarge {
        /// Number of 20-byte blocks the request would need
        blocks: u64,
    },

    /// Configuration document or value rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `step` was called after the derivation finished
    #[error("Derivation already complete")]
    AlreadyComplete,

    /// The derivation was cancelled before it finished
    #[error("Derivation was cancelled")]
    Cancelled,

    /// The hash primitive rejected its input
    #[error("Hash error: {0}")]
    Hash(#[from] HashError),

    /// The cooperative runtime failed
    #[error("Task error: {0}")]
    Task(TaskError),

    /// Internal error occurred
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KdfError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an `invalid_config` error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<TaskError> for KdfError {
    fn from(error: TaskError) -> Self {
        match error {
            TaskError::Cancelled => Self::Cancelled,
            other => Self::Task(other),
        }
    }
}

/// Result type for key derivation operations
pub type Result<T> = std::result::Result<T, KdfError>;
