//! In-memory content store backend.

use crate::error::{StoreError, StoreResult};
use crate::traits::{ContentStore, StoredContent};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

/// Process-lifetime in-memory content store.
///
/// A single lock guards the whole map: every mutation is serialized, and
/// readers never observe a partially-written entry. No await point runs
/// while the lock is held.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, StoredContent>>,
    retention: Duration,
}

impl MemoryBackend {
    /// Create a new in-memory backend with the given retention window.
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            retention,
        }
    }

    /// Evict every entry strictly older than the retention window.
    /// Runs under the write lock the caller already holds.
    fn sweep(entries: &mut HashMap<String, StoredContent>, retention: Duration) -> usize {
        let now = OffsetDateTime::now_utc();
        let before = entries.len();
        entries.retain(|_, content| now - content.stored_at <= retention);
        before - entries.len()
    }
}

#[async_trait]
impl ContentStore for MemoryBackend {
    async fn put(&self, name: &str, data: Bytes) -> StoreResult<usize> {
        if name.is_empty() {
            return Err(StoreError::InvalidName("name must not be empty".to_string()));
        }

        let content = StoredContent {
            data,
            original_name: name.to_string(),
            stored_at: OffsetDateTime::now_utc(),
        };

        let mut entries = self.entries.write().await;
        entries.insert(name.to_string(), content);

        // Retention sweep runs synchronously on every put, not on a timer.
        let evicted = Self::sweep(&mut entries, self.retention);
        if evicted > 0 {
            tracing::debug!(evicted, "retention sweep evicted expired content");
        }
        Ok(evicted)
    }

    async fn get(&self, name: &str) -> StoreResult<StoredContent> {
        let entries = self.entries.read().await;
        entries
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn object_count(&self) -> StoreResult<u64> {
        Ok(self.entries.read().await.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> Duration {
        Duration::hours(24)
    }

    #[tokio::test]
    async fn put_then_get_roundtrips_exact_bytes() {
        let store = MemoryBackend::new(day());
        let data = Bytes::from_static(b"%PDF-1.7 sample");

        store.put("report.pdf", data.clone()).await.unwrap();
        let content = store.get("report.pdf").await.unwrap();

        assert_eq!(content.data, data);
        assert_eq!(content.original_name, "report.pdf");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryBackend::new(day());
        match store.get("nowhere.pdf").await {
            Err(StoreError::NotFound(name)) => assert_eq!(name, "nowhere.pdf"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn put_is_last_write_wins() {
        let store = MemoryBackend::new(day());
        store
            .put("a.txt", Bytes::from_static(b"first"))
            .await
            .unwrap();
        let first_stamp = store.get("a.txt").await.unwrap().stored_at;

        store
            .put("a.txt", Bytes::from_static(b"second"))
            .await
            .unwrap();
        let content = store.get("a.txt").await.unwrap();

        assert_eq!(content.data, Bytes::from_static(b"second"));
        assert!(content.stored_at >= first_stamp);
        assert_eq!(store.object_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn put_rejects_empty_name() {
        let store = MemoryBackend::new(day());
        match store.put("", Bytes::from_static(b"x")).await {
            Err(StoreError::InvalidName(_)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sweep_on_put_evicts_aged_entries() {
        let store = MemoryBackend::new(day());
        store
            .put("old.pdf", Bytes::from_static(b"old"))
            .await
            .unwrap();

        // Age the entry past the 24 h window.
        {
            let mut entries = store.entries.write().await;
            let entry = entries.get_mut("old.pdf").unwrap();
            entry.stored_at -= Duration::hours(25);
        }

        let evicted = store
            .put("fresh.pdf", Bytes::from_static(b"fresh"))
            .await
            .unwrap();

        assert_eq!(evicted, 1);
        assert!(matches!(
            store.get("old.pdf").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.get("fresh.pdf").await.is_ok());
    }

    #[tokio::test]
    async fn entries_inside_window_survive_sweep() {
        let store = MemoryBackend::new(day());
        store.put("a.pdf", Bytes::from_static(b"a")).await.unwrap();

        {
            let mut entries = store.entries.write().await;
            let entry = entries.get_mut("a.pdf").unwrap();
            entry.stored_at -= Duration::hours(23);
        }

        let evicted = store.put("b.pdf", Bytes::from_static(b"b")).await.unwrap();
        assert_eq!(evicted, 0);
        assert!(store.get("a.pdf").await.is_ok());
    }

    #[tokio::test]
    async fn get_does_not_extend_retention() {
        let store = MemoryBackend::new(day());
        store.put("a.pdf", Bytes::from_static(b"a")).await.unwrap();

        let aged = OffsetDateTime::now_utc() - Duration::hours(23);
        {
            let mut entries = store.entries.write().await;
            entries.get_mut("a.pdf").unwrap().stored_at = aged;
        }

        // A read must not refresh the timestamp.
        let _ = store.get("a.pdf").await.unwrap();
        let stamp = store.entries.read().await.get("a.pdf").unwrap().stored_at;
        assert_eq!(stamp, aged);
    }
}
