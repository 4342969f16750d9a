//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid job id: {0}")]
    InvalidJobId(String),

    #[error("invalid priority: {0} (expected high, medium, or low)")]
    InvalidPriority(String),

    #[error("invalid status: {0} (expected pending, processing, or completed)")]
    InvalidStatus(String),

    #[error("invalid copy count: {0} (must be a positive integer)")]
    InvalidCopyCount(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
