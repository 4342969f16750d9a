//! Operator queue handlers.

use crate::error::{ApiError, ApiResult};
use crate::handlers::advance_and_notify;
use crate::metrics::QUEUE_DEPTH;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use imprint_core::{Job, JobId, JobStatus, QueueEntry};
use serde::Serialize;

/// Queue listing response.
#[derive(Debug, Serialize)]
pub struct QueueResponse {
    /// Entries in queue order (priority rank, then submission time).
    pub entries: Vec<QueueEntry>,
}

/// GET /v1/queue - Ordered queue listing for the operator display.
pub async fn list_queue(State(state): State<AppState>) -> ApiResult<Json<QueueResponse>> {
    Ok(Json(QueueResponse {
        entries: state.queue.list().await,
    }))
}

/// Next-job response. `entry` is null when no pending work exists, which
/// is a valid outcome, not an error.
#[derive(Debug, Serialize)]
pub struct NextJobResponse {
    pub entry: Option<QueueEntry>,
}

/// GET /v1/queue/next - The first entry whose job is still pending.
///
/// An entry whose job is already processing stays at the head of the
/// queue (it is removed only on completion) but is not offered again.
pub async fn next_job(State(state): State<AppState>) -> ApiResult<Json<NextJobResponse>> {
    for entry in state.queue.list().await {
        let job = state.index.find(entry.id).await.ok_or_else(|| {
            ApiError::Internal(format!("queued entry {} has no tracking record", entry.id))
        })?;
        if job.status == JobStatus::Pending {
            return Ok(Json(NextJobResponse { entry: Some(entry) }));
        }
    }
    Ok(Json(NextJobResponse { entry: None }))
}

/// DELETE /v1/queue/{job_id} - Mark a job done.
///
/// Removes the queue entry and advances the lifecycle stepwise to
/// `completed`, firing a notification per transition. The tracking record
/// survives for status queries.
pub async fn complete_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::parse(&job_id)?;

    if !state.queue.remove(id).await {
        return Err(ApiError::NotFound(format!("queue entry not found: {id}")));
    }
    QUEUE_DEPTH.set(state.queue.len().await as i64);

    let mut job = state
        .index
        .find(id)
        .await
        .ok_or_else(|| ApiError::Internal(format!("job record missing for queue entry {id}")))?;

    // Never skip a state: a job completed straight from pending passes
    // through processing first, notifying at each step.
    while let Some(next) = job.status.next() {
        job = advance_and_notify(&state, id, next, None).await?;
    }

    tracing::info!(job_id = %id, "job completed and removed from queue");
    Ok(Json(job))
}
