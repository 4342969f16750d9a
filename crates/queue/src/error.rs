//! Queue and tracking index error types.

use imprint_core::JobStatus;
use thiserror::Error;

/// Queue and tracking index operation errors.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("job not found: {0}")]
    NotFound(String),

    /// Identifiers are system-generated; a collision is a bug, not input.
    #[error("job already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}

/// Result type for queue operations.
pub type QueueResult<T> = std::result::Result<T, QueueError>;
