//! Print queue ordering and job tracking for Imprint.
//!
//! This crate provides the two in-memory stores at the heart of the
//! service:
//! - [`PrintQueue`]: the ordered collection of jobs awaiting the operator,
//!   sorted by (priority rank, submission time) with a stable tie-break
//! - [`TrackingIndex`]: job records and lifecycle status by identifier,
//!   surviving queue removal for the process lifetime
//!
//! Both are single shared mutable resources guarded by one lock each;
//! persistence across restarts is explicitly out of scope.

pub mod error;
pub mod index;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use index::{JobStats, TrackingIndex};
pub use queue::PrintQueue;
