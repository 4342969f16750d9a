//! HTTP API server for the Imprint print-job queue.
//!
//! This crate provides the HTTP boundary:
//! - Job submission (multipart upload)
//! - Operator queue listing, peek, and completion
//! - Lifecycle status updates and customer-facing tracking
//! - Content download with media-type mapping
//! - Health, stats, and Prometheus metrics endpoints

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
