//! Job queue wrapper for dequeuing and settling background jobs.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing;

use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::JobId;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_entity::job::model::{CreateJob, Job};

/// Job queue for claiming and settling work.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for database persistence.
    repo: Arc<JobRepository>,
    /// Worker identifier for claiming jobs.
    worker_id: String,
    /// Base delay for the exponential retry backoff.
    retry_backoff_seconds: i64,
}

impl JobQueue {
    /// Create a new job queue.
    pub fn new(repo: Arc<JobRepository>, worker_id: String, retry_backoff_seconds: i64) -> Self {
        Self {
            repo,
            worker_id,
            retry_backoff_seconds,
        }
    }

    /// The identifier this queue claims jobs under.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Enqueue a new job.
    pub async fn enqueue(&self, data: &CreateJob) -> AppResult<Job> {
        let job = self.repo.enqueue(data).await?;
        tracing::debug!(
            job_id = %job.id,
            job_type = %job.job_type,
            queue = %job.queue,
            "Enqueued job"
        );
        Ok(job)
    }

    /// Dequeue the next available job from the given queues, in order.
    ///
    /// Claiming stamps this worker and bumps the attempt counter, so the
    /// returned job's `attempts` is the current attempt number.
    pub async fn dequeue(&self, queues: &[&str]) -> AppResult<Option<Job>> {
        for queue in queues {
            if let Some(job) = self.repo.claim_next(queue, &self.worker_id).await? {
                tracing::debug!(
                    job_id = %job.id,
                    job_type = %job.job_type,
                    queue = %job.queue,
                    attempt = job.attempts,
                    "Dequeued job"
                );
                return Ok(Some(job));
            }
        }
        Ok(None)
    }

    /// Mark a job as completed successfully.
    pub async fn complete(&self, job_id: JobId) -> AppResult<()> {
        self.repo.mark_completed(job_id).await?;
        tracing::debug!(job_id = %job_id, "Job completed");
        Ok(())
    }

    /// Mark a job as terminally failed.
    pub async fn fail(&self, job_id: JobId, error: &str) -> AppResult<()> {
        self.repo.mark_failed(job_id, error).await?;
        tracing::debug!(job_id = %job_id, error = %error, "Job failed");
        Ok(())
    }

    /// Put a job back on the queue with an exponential backoff.
    ///
    /// The delay doubles with every attempt already spent: base for the
    /// first retry, twice that for the second, and so on.
    pub async fn retry_later(&self, job: &Job, error: &str) -> AppResult<()> {
        let delay = backoff_seconds(self.retry_backoff_seconds, job.attempts);
        let run_at = Utc::now() + Duration::seconds(delay);
        self.repo.reschedule(job.id, error, run_at).await?;
        tracing::debug!(
            job_id = %job.id,
            attempt = job.attempts,
            delay_seconds = delay,
            "Job rescheduled"
        );
        Ok(())
    }
}

/// Compute the backoff delay for a retry after `attempts` tries.
fn backoff_seconds(base: i64, attempts: i32) -> i64 {
    let exponent = attempts.saturating_sub(1).clamp(0, 16) as u32;
    base.saturating_mul(1_i64 << exponent)
}
