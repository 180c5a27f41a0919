//! Job row and enqueue types.

use beyondtrips_core::types::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{JobPriority, JobStatus};

/// One row on the durable side-effect queue.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Dispatch key, e.g. `"reward_counters"` or `"driver_notify"`.
    pub job_type: String,
    /// Logical queue the job belongs to.
    pub queue: String,
    /// Claim order relative to other pending jobs.
    pub priority: JobPriority,
    /// JSON payload matching `job_type`.
    pub payload: serde_json::Value,
    /// Message recorded by the most recent failed attempt.
    pub error_message: Option<String>,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Delivery attempts so far.
    pub attempts: i32,
    /// Attempts allowed before the job is marked failed.
    pub max_attempts: i32,
    /// Earliest claim time; `None` means immediately.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Start of the current attempt.
    pub started_at: Option<DateTime<Utc>>,
    /// When a terminal status was reached.
    pub completed_at: Option<DateTime<Utc>>,
    /// Identity of the worker holding the claim.
    pub worker_id: Option<String>,
    /// When the job was enqueued.
    pub created_at: DateTime<Utc>,
    /// When the row last changed.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Whether another delivery attempt is allowed.
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }
}

/// Everything needed to enqueue a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    /// Dispatch key.
    pub job_type: String,
    /// Logical queue.
    pub queue: String,
    /// Claim order.
    pub priority: JobPriority,
    /// JSON payload matching `job_type`.
    pub payload: serde_json::Value,
    /// Attempts allowed before failing permanently.
    pub max_attempts: i32,
    /// Earliest claim time.
    pub scheduled_at: Option<DateTime<Utc>>,
}
