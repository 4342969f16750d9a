//! Job submission and tracking handlers.

use crate::error::{ApiError, ApiResult};
use crate::handlers::advance_and_notify;
use crate::metrics::{FILES_EXPIRED, JOBS_SUBMITTED, NOTIFICATIONS_EMITTED, QUEUE_DEPTH};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, Path, Request, State};
use axum::http::StatusCode;
use bytes::Bytes;
use imprint_core::{
    DEFAULT_COPIES, Job, JobId, JobStatus, Priority, StatusUpdateRequest, SubmitResponse,
};
use imprint_notify::StatusNotification;

/// Maximum request body size for status update requests (64 KiB).
const MAX_STATUS_BODY_SIZE: usize = 64 * 1024;

/// Parsed submission form fields.
struct SubmitForm {
    file_name: String,
    data: Bytes,
    copies: u32,
    priority: Priority,
}

/// Read the multipart submission form.
///
/// `file` is required; `copies` defaults to 1 and `priority` to medium
/// when omitted or empty. Unknown fields are ignored.
async fn read_submit_form(mut multipart: Multipart) -> ApiResult<SubmitForm> {
    let mut file: Option<(String, Bytes)> = None;
    let mut copies: Option<String> = None;
    let mut priority: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        ApiError::BadRequest("file field must carry a file name".to_string())
                    })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?;
                file = Some((name, data));
            }
            Some("copies") => {
                copies = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("failed to read copies: {e}")))?,
                );
            }
            Some("priority") => {
                priority = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("failed to read priority: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;

    let copies = parse_copies(copies.as_deref())?;
    let priority = match priority.as_deref() {
        None | Some("") => Priority::default(),
        Some(s) => s.parse()?,
    };

    Ok(SubmitForm {
        file_name,
        data,
        copies,
        priority,
    })
}

/// Parse the copy count field: absent means 1, anything else must be a
/// positive integer.
fn parse_copies(raw: Option<&str>) -> ApiResult<u32> {
    let raw = match raw {
        None | Some("") => return Ok(DEFAULT_COPIES),
        Some(raw) => raw,
    };

    let copies: u32 = raw
        .parse()
        .map_err(|_| imprint_core::Error::InvalidCopyCount(raw.to_string()))?;
    if copies == 0 {
        return Err(imprint_core::Error::InvalidCopyCount(raw.to_string()).into());
    }
    Ok(copies)
}

/// POST /v1/jobs - Submit a file for printing.
///
/// Stores the content, records the job, enqueues the queue entry, and
/// emits the initial `pending` notification.
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_job(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let form = read_submit_form(multipart).await?;

    let evicted = state.content.put(&form.file_name, form.data).await?;
    if evicted > 0 {
        FILES_EXPIRED.inc_by(evicted as u64);
        tracing::info!(evicted, "retention sweep evicted expired content");
    }

    let job = Job::new(form.file_name, form.copies, form.priority);
    state.index.record(job.clone()).await?;
    state.queue.enqueue(job.queue_entry()).await?;
    QUEUE_DEPTH.set(state.queue.len().await as i64);
    JOBS_SUBMITTED.inc();

    state
        .notifier
        .emit(StatusNotification::new(job.id, job.status));
    NOTIFICATIONS_EMITTED.inc();

    tracing::info!(
        job_id = %job.id,
        file_name = %job.file_name,
        copies = job.copies,
        priority = %job.priority,
        "job submitted"
    );

    Ok((StatusCode::CREATED, Json(SubmitResponse::from(&job))))
}

/// GET /v1/jobs/{job_id} - Track a job's full record and current status.
///
/// Works for the job's whole process lifetime, including after its queue
/// entry is gone.
pub async fn track_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::parse(&job_id)?;
    let job = state
        .index
        .find(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("job not found: {id}")))?;
    Ok(Json(job))
}

/// POST /v1/jobs/{job_id}/status - Advance a job's lifecycle status.
///
/// Rejects out-of-order transitions with the original status retained.
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    req: Request,
) -> ApiResult<Json<Job>> {
    let id = JobId::parse(&job_id)?;

    let body: StatusUpdateRequest = {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_STATUS_BODY_SIZE)
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read body: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON: {e}")))?
    };

    let new_status = JobStatus::parse(&body.status)?;
    let job = advance_and_notify(&state, id, new_status, body.message).await?;
    Ok(Json(job))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_copies_defaults_and_bounds() {
        assert_eq!(parse_copies(None).unwrap(), 1);
        assert_eq!(parse_copies(Some("")).unwrap(), 1);
        assert_eq!(parse_copies(Some("3")).unwrap(), 3);
        assert!(parse_copies(Some("0")).is_err());
        assert!(parse_copies(Some("-1")).is_err());
        assert!(parse_copies(Some("many")).is_err());
    }
}
