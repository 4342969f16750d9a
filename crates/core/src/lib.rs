//! Core domain types and shared logic for the Imprint print-job queue.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Job identifiers, priorities, and lifecycle status
//! - Job and queue-entry records
//! - Submit/status request and response DTOs
//! - The file-extension to media-type table
//! - Configuration types

pub mod config;
pub mod error;
pub mod job;
pub mod media_type;

pub use config::{AppConfig, NotifyConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use job::{Job, JobId, JobStatus, Priority, QueueEntry, StatusUpdateRequest, SubmitResponse};
pub use media_type::media_type_for;

/// Retention window for stored content: 24 hours.
pub const DEFAULT_RETENTION_SECS: u64 = 24 * 60 * 60;

/// Default copy count when a submission omits it.
pub const DEFAULT_COPIES: u32 = 1;
