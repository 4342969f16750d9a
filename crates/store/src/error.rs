//! Content store error types.

use thiserror::Error;

/// Content store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for content store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
