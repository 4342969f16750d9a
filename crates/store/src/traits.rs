//! Content store trait definitions.

use crate::error::StoreResult;
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;

/// A stored file: raw bytes plus the original name and the storage time.
///
/// Owned exclusively by the content store; jobs reference it by name only.
#[derive(Clone, Debug)]
pub struct StoredContent {
    /// The file content.
    pub data: Bytes,
    /// The name the file was submitted under.
    pub original_name: String,
    /// When the content was stored. Overwrites reset this; reads never do.
    pub stored_at: OffsetDateTime,
}

/// Content store abstraction: uploaded file bytes keyed by name, with
/// time-based expiry.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Store or overwrite content under `name`, stamped with the current
    /// time (atomic replace-by-key, last-write-wins), then run the
    /// retention sweep over the whole store.
    ///
    /// Returns the number of entries the sweep evicted.
    async fn put(&self, name: &str, data: Bytes) -> StoreResult<usize>;

    /// Get stored content by name.
    ///
    /// Does not refresh the storage timestamp: reading never extends
    /// retention.
    async fn get(&self, name: &str) -> StoreResult<StoredContent>;

    /// Number of entries currently stored.
    async fn object_count(&self) -> StoreResult<u64>;

    /// Static identifier for the backend type, used for logging.
    fn backend_name(&self) -> &'static str;
}
