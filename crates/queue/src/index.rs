//! Tracking index: job records and status lookup by identifier.

use crate::error::{QueueError, QueueResult};
use imprint_core::{Job, JobId, JobStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Job counts by lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
}

/// Lookup of a job's full record and current status by its identifier,
/// independent of queue position.
///
/// Records live for the process lifetime: a job stays trackable after its
/// queue entry is removed. This is the single point of status mutation.
#[derive(Default)]
pub struct TrackingIndex {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl TrackingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly created job.
    ///
    /// The id must not already exist; a duplicate is a programming-error
    /// class fault since identifiers are system-generated.
    pub async fn record(&self, job: Job) -> QueueResult<()> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(QueueError::AlreadyExists(job.id.to_string()));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    /// Look up a job record by id.
    pub async fn find(&self, id: JobId) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Advance a job's lifecycle status.
    ///
    /// Enforces the pending -> processing -> completed sequence; an illegal
    /// transition is rejected and the stored status is left unchanged.
    /// Returns the updated record.
    pub async fn update_status(&self, id: JobId, new_status: JobStatus) -> QueueResult<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| QueueError::NotFound(id.to_string()))?;

        if !job.status.can_transition_to(new_status) {
            return Err(QueueError::InvalidTransition {
                from: job.status,
                to: new_status,
            });
        }

        job.status = new_status;
        job.updated_at = OffsetDateTime::now_utc();
        tracing::debug!(job_id = %id, status = %new_status, "job status advanced");
        Ok(job.clone())
    }

    /// Job counts by status, for the operator dashboard.
    pub async fn stats(&self) -> JobStats {
        let jobs = self.jobs.read().await;
        let mut stats = JobStats {
            total: jobs.len(),
            ..Default::default()
        };
        for job in jobs.values() {
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::Processing => stats.processing += 1,
                JobStatus::Completed => stats.completed += 1,
            }
        }
        stats
    }
}
