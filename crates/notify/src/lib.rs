//! Customer status notification dispatch.
//!
//! Status transitions emit a [`StatusNotification`] through a
//! [`NotifierHandle`]; a spawned task consumes the events and hands them to
//! the configured [`Notifier`]. Dispatch is strictly best-effort: the job's
//! status is the source of truth, and a delivery failure is logged and
//! swallowed, never propagated back to the operation that triggered it.
//!
//! Real delivery (email and the like) is an external collaborator; the
//! built-in [`LogNotifier`] writes the payload to the tracing output.

use async_trait::async_trait;
use imprint_core::config::NotifyConfig;
use imprint_core::{JobId, JobStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Notification dispatch errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Result type for notification dispatch.
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;

/// Payload handed to the notification collaborator on every committed
/// status transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusNotification {
    pub job_id: JobId,
    pub status: JobStatus,
    pub message: String,
}

impl StatusNotification {
    /// Build a notification with the stock message for `status`.
    pub fn new(job_id: JobId, status: JobStatus) -> Self {
        Self {
            job_id,
            status,
            message: status_message(status).to_string(),
        }
    }

    /// Build a notification with a caller-provided message.
    pub fn with_message(job_id: JobId, status: JobStatus, message: impl Into<String>) -> Self {
        Self {
            job_id,
            status,
            message: message.into(),
        }
    }
}

/// Stock human-readable message for a status.
pub fn status_message(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "Your job has been added to the print queue",
        JobStatus::Processing => "Your job is being printed",
        JobStatus::Completed => "Your job is ready for pickup",
    }
}

/// A notification delivery collaborator.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, notification: &StatusNotification) -> NotifyResult<()>;
}

/// Log-only notifier: writes each payload to the tracing output.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &StatusNotification) -> NotifyResult<()> {
        tracing::info!(
            job_id = %notification.job_id,
            status = %notification.status,
            message = %notification.message,
            "status notification dispatched"
        );
        Ok(())
    }
}

/// Recording notifier that captures every payload.
///
/// **For testing only.** Lets integration tests assert which notifications
/// a flow emitted without a real delivery channel.
#[derive(Default)]
pub struct RecordingNotifier {
    received: tokio::sync::Mutex<Vec<StatusNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the payloads received so far.
    pub async fn received(&self) -> Vec<StatusNotification> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &StatusNotification) -> NotifyResult<()> {
        self.received.lock().await.push(notification.clone());
        Ok(())
    }
}

/// Sending side of the notification channel.
///
/// Cheap to clone; held by the application state. `emit` never blocks and
/// never fails the caller: if the consumer task is gone, the event is
/// dropped with a warning.
#[derive(Clone)]
pub struct NotifierHandle {
    tx: mpsc::UnboundedSender<StatusNotification>,
}

impl NotifierHandle {
    /// Spawn the consumer task for `notifier` and return the handle to
    /// emit through, plus the task's join handle.
    pub fn spawn(notifier: Arc<dyn Notifier>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<StatusNotification>();

        let task = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(e) = notifier.notify(&notification).await {
                    // Best-effort: status is the source of truth.
                    tracing::warn!(
                        job_id = %notification.job_id,
                        status = %notification.status,
                        error = %e,
                        "notification delivery failed"
                    );
                }
            }
        });

        (Self { tx }, task)
    }

    /// Queue a notification for asynchronous delivery.
    pub fn emit(&self, notification: StatusNotification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::warn!(error = %e, "notifier task is gone, dropping notification");
        }
    }
}

/// Create a notifier from configuration.
pub fn from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match config {
        NotifyConfig::Log => Arc::new(LogNotifier),
    }
}
