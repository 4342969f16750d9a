//! Job types and lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// Unique identifier for a print job.
///
/// Also identifies the job's queue entry while the job is awaiting the
/// operator; the two share one id for the job's whole lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| crate::Error::InvalidJobId(format!("{s}: {e}")))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job priority.
///
/// The primary queue sort key: `rank()` orders `high` before `medium`
/// before `low`. Submissions that omit priority get `Medium`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Ordering weight: lower rank sorts earlier in the queue.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(crate::Error::InvalidPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job lifecycle status.
///
/// Transitions are monotonic through `pending -> processing -> completed`;
/// no state is skipped and none reverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Awaiting operator action (initial).
    Pending,
    /// Being printed.
    Processing,
    /// Ready for pickup (terminal).
    Completed,
}

impl JobStatus {
    /// The only legal successor state, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Processing),
            Self::Processing => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Check whether a transition to `to` is legal.
    pub fn can_transition_to(&self, to: Self) -> bool {
        self.next() == Some(to)
    }

    /// Check if the job reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }

    /// Parse from a string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            other => Err(crate::Error::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's print job.
///
/// Everything except `status` and `updated_at` is immutable after creation;
/// status changes go through the tracking index only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Name of the submitted file; keys into the content store.
    pub file_name: String,
    /// Requested copy count (>= 1).
    pub copies: u32,
    /// Queue priority.
    pub priority: Priority,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// When the job was submitted. Used for queue tie-break only.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// When the status last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Job {
    /// Create a new pending job stamped with the current time.
    pub fn new(file_name: impl Into<String>, copies: u32, priority: Priority) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: JobId::new(),
            file_name: file_name.into(),
            copies,
            priority,
            status: JobStatus::Pending,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// The job's queue representation.
    pub fn queue_entry(&self) -> QueueEntry {
        QueueEntry {
            id: self.id,
            file_name: self.file_name.clone(),
            copies: self.copies,
            priority: self.priority,
            submitted_at: self.submitted_at,
        }
    }
}

/// A job's representation while awaiting operator action.
///
/// Created on submission, destroyed when the operator marks the job done.
/// Carries `priority` because it is the primary sort key; the job record in
/// the tracking index remains the source of truth for status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: JobId,
    pub file_name: String,
    pub copies: u32,
    pub priority: Priority,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// Response from submitting a job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// The issued job identifier, used for tracking and completion.
    pub id: JobId,
    pub file_name: String,
    pub copies: u32,
    pub priority: Priority,
    pub status: JobStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl From<&Job> for SubmitResponse {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            file_name: job.file_name.clone(),
            copies: job.copies,
            priority: job.priority,
            status: job.status,
            submitted_at: job.submitted_at,
        }
    }
}

/// Request to advance a job's lifecycle status.
///
/// `status` stays a string here so the boundary can reject unknown values
/// as invalid input rather than a deserialization failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The requested new status.
    pub status: String,
    /// Optional human-readable message for the customer notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
