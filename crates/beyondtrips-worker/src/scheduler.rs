//! Cron scheduler for periodic maintenance tasks.
//!
//! The scheduler never does the work itself. Each tick enqueues a
//! durable job, so a sweep that fires while the worker is down is
//! picked up once the worker returns.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use beyondtrips_core::error::AppError;
use beyondtrips_core::result::AppResult;
use beyondtrips_entity::job::payload::JobPayload;
use beyondtrips_service::outbox;

use crate::queue::JobQueue;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Job queue for enqueuing scheduled work.
    queue: Arc<JobQueue>,
    /// Hours between overdue pickup sweeps.
    sweep_interval_hours: u64,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("sweep_interval_hours", &self.sweep_interval_hours)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(queue: Arc<JobQueue>, sweep_interval_hours: u64) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            queue,
            sweep_interval_hours,
        })
    }

    /// Register all periodic tasks.
    pub async fn register_default_tasks(&self) -> AppResult<()> {
        self.register_overdue_pickup_sweep().await?;
        self.register_scan_event_prune().await?;
        self.register_job_prune().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shut down the scheduler.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Overdue pickup sweep, every `sweep_interval_hours` hours.
    async fn register_overdue_pickup_sweep(&self) -> AppResult<()> {
        let schedule = format!("0 0 */{} * * *", self.sweep_interval_hours.max(1));
        self.register_task(&schedule, JobPayload::OverduePickupSweep, 3)
            .await?;

        tracing::info!(
            interval_hours = self.sweep_interval_hours,
            "Registered: overdue_pickup_sweep"
        );
        Ok(())
    }

    /// Scan event prune, daily at 3 AM.
    async fn register_scan_event_prune(&self) -> AppResult<()> {
        self.register_task("0 0 3 * * *", JobPayload::ScanEventPrune, 1)
            .await?;

        tracing::info!("Registered: scan_event_prune (daily at 3AM)");
        Ok(())
    }

    /// Terminal job prune, daily at 4 AM.
    async fn register_job_prune(&self) -> AppResult<()> {
        self.register_task("0 0 4 * * *", JobPayload::JobPrune, 1)
            .await?;

        tracing::info!("Registered: job_prune (daily at 4AM)");
        Ok(())
    }

    /// Register one cron entry that enqueues the given payload on each tick.
    async fn register_task(
        &self,
        schedule: &str,
        payload: JobPayload,
        max_attempts: i32,
    ) -> AppResult<()> {
        let job_type = payload.job_type();
        let data = outbox::create_job(&payload, max_attempts)?;
        let queue = Arc::clone(&self.queue);

        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            let data = data.clone();
            Box::pin(async move {
                tracing::debug!(job_type = %data.job_type, "Scheduling periodic job");
                if let Err(e) = queue.enqueue(&data).await {
                    tracing::error!(
                        job_type = %data.job_type,
                        error = %e,
                        "Failed to enqueue periodic job"
                    );
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create schedule for '{job_type}': {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add schedule for '{job_type}': {e}"))
        })?;

        Ok(())
    }
}
