//! Shared handler helpers.

use crate::error::ApiResult;
use crate::state::AppState;
use imprint_core::{Job, JobId, JobStatus};
use imprint_notify::StatusNotification;

/// Advance a job's status through the tracking index and emit the
/// customer notification for the committed transition.
///
/// The notification is queued after the transition commits and is
/// best-effort: its delivery can never fail or roll back the transition.
pub async fn advance_and_notify(
    state: &AppState,
    id: JobId,
    new_status: JobStatus,
    message: Option<String>,
) -> ApiResult<Job> {
    let job = state.index.update_status(id, new_status).await?;

    let notification = match message {
        Some(message) => StatusNotification::with_message(id, new_status, message),
        None => StatusNotification::new(id, new_status),
    };
    state.notifier.emit(notification);
    crate::metrics::NOTIFICATIONS_EMITTED.inc();

    if new_status.is_terminal() {
        crate::metrics::JOBS_COMPLETED.inc();
    }

    Ok(job)
}
