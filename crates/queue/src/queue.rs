//! Priority-ordered print queue.

use crate::error::{QueueError, QueueResult};
use imprint_core::{JobId, QueueEntry};
use tokio::sync::RwLock;

/// The ordered collection of jobs awaiting operator action.
///
/// Entries are kept fully sorted by `(priority rank, submission time)`; the
/// sort is stable, so equal-key entries keep their insertion order. Every
/// enqueue re-sorts the whole sequence — O(n log n), fine at the expected
/// scale of tens to low hundreds of jobs. If that ever changes, swap the
/// `Vec` for an indexed heap keyed by the same tuple; the API stays put.
///
/// One lock guards the whole sequence, since the sort touches all of it.
#[derive(Default)]
pub struct PrintQueue {
    entries: RwLock<Vec<QueueEntry>>,
}

impl PrintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and restore the queue order.
    ///
    /// Rejects a duplicate id: entry ids are system-generated, so a
    /// collision means a bug upstream.
    pub async fn enqueue(&self, entry: QueueEntry) -> QueueResult<JobId> {
        let id = entry.id;
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id == id) {
            return Err(QueueError::AlreadyExists(id.to_string()));
        }

        entries.push(entry);
        // Stable sort: equal (priority, timestamp) keys keep insertion order.
        entries.sort_by_key(|e| (e.priority.rank(), e.submitted_at));
        Ok(id)
    }

    /// First entry in queue order, without removing it.
    pub async fn front(&self) -> Option<QueueEntry> {
        self.entries.read().await.first().cloned()
    }

    /// Remove the entry with the given id.
    ///
    /// Idempotent: returns false when the id is absent. Never perturbs the
    /// relative order of the surviving entries.
    pub async fn remove(&self, id: JobId) -> bool {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|e| e.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the current order.
    ///
    /// A defensive copy: the internal order changes on every enqueue, so
    /// callers never get a live reference.
    pub async fn list(&self) -> Vec<QueueEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
