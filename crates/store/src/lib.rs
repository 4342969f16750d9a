//! Content store abstraction and backends for Imprint.
//!
//! This crate provides:
//! - File content storage keyed by the submitted file name
//! - A retention sweep that evicts content older than the configured window,
//!   run synchronously on every put
//! - Backend: process-lifetime in-memory (persistence across restarts is
//!   out of scope)

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::memory::MemoryBackend;
pub use error::{StoreError, StoreResult};
pub use traits::{ContentStore, StoredContent};

use imprint_core::config::StoreConfig;
use std::sync::Arc;

/// Create a content store from configuration.
pub fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ContentStore>> {
    config.validate().map_err(StoreError::Config)?;

    match config {
        StoreConfig::Memory { .. } => {
            let backend = MemoryBackend::new(config.retention());
            Ok(Arc::new(backend))
        }
    }
}
