//! Worker runner: the main loop that polls for jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Semaphore};
use tokio::time;
use tracing;

use beyondtrips_core::config::worker::WorkerConfig;
use beyondtrips_entity::job::payload::{QUEUE_MAINTENANCE, QUEUE_REWARDS};

use crate::executor::{JobExecutionError, JobExecutor};
use crate::queue::JobQueue;

/// Main worker runner that polls queues and executes jobs.
#[derive(Debug)]
pub struct WorkerRunner {
    /// Job queue for polling.
    queue: Arc<JobQueue>,
    /// Job executor for dispatching.
    executor: Arc<JobExecutor>,
    /// Worker configuration.
    config: WorkerConfig,
    /// Queues to poll, in priority order.
    queues: Vec<String>,
}

impl WorkerRunner {
    /// Create a new worker runner polling the reward and maintenance queues.
    pub fn new(queue: Arc<JobQueue>, executor: Arc<JobExecutor>, config: WorkerConfig) -> Self {
        Self {
            queue,
            executor,
            config,
            queues: vec![QUEUE_REWARDS.to_string(), QUEUE_MAINTENANCE.to_string()],
        }
    }

    /// Override the queues to poll.
    pub fn with_queues(mut self, queues: Vec<String>) -> Self {
        self.queues = queues;
        self
    }

    /// Run until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            worker_id = %self.queue.worker_id(),
            concurrency = self.config.concurrency,
            poll_interval_seconds = self.config.poll_interval_seconds,
            queues = ?self.queues,
            "Worker started"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let poll_interval = Duration::from_secs(self.config.poll_interval_seconds);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!(
                            worker_id = %self.queue.worker_id(),
                            "Worker received shutdown signal"
                        );
                        break;
                    }
                }
                _ = self.poll_and_execute(&semaphore) => {
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                tracing::info!(
                                    worker_id = %self.queue.worker_id(),
                                    "Worker shutting down"
                                );
                                break;
                            }
                        }
                        _ = time::sleep(poll_interval) => {}
                    }
                }
            }
        }

        tracing::info!(
            worker_id = %self.queue.worker_id(),
            "Waiting for in-flight jobs to complete"
        );

        let max_permits = self.config.concurrency as u32;
        let _ = time::timeout(Duration::from_secs(30), semaphore.acquire_many(max_permits)).await;

        tracing::info!(worker_id = %self.queue.worker_id(), "Worker shut down");
    }

    /// Poll once and spawn execution of the claimed job, if any.
    async fn poll_and_execute(&self, semaphore: &Arc<Semaphore>) {
        let permit = match semaphore.clone().try_acquire_owned() {
            Ok(p) => p,
            Err(_) => {
                tracing::trace!("All worker slots occupied");
                return;
            }
        };

        let queue_refs: Vec<&str> = self.queues.iter().map(|s| s.as_str()).collect();

        match self.queue.dequeue(&queue_refs).await {
            Ok(Some(job)) => {
                let queue = Arc::clone(&self.queue);
                let executor = Arc::clone(&self.executor);

                tokio::spawn(async move {
                    let _permit = permit;
                    let job_id = job.id;

                    match executor.execute(&job).await {
                        Ok(()) => {
                            if let Err(e) = queue.complete(job_id).await {
                                tracing::error!(
                                    job_id = %job_id,
                                    error = %e,
                                    "Failed to mark job as completed"
                                );
                            }
                        }
                        Err(JobExecutionError::Transient(msg)) => {
                            tracing::warn!(
                                job_id = %job_id,
                                attempt = job.attempts,
                                error = %msg,
                                "Job failed (transient)"
                            );
                            let settle = if job.can_retry() {
                                queue.retry_later(&job, &msg).await
                            } else {
                                queue.fail(job_id, &msg).await
                            };
                            if let Err(e) = settle {
                                tracing::error!(
                                    job_id = %job_id,
                                    error = %e,
                                    "Failed to settle job after transient failure"
                                );
                            }
                        }
                        Err(JobExecutionError::Permanent(msg)) => {
                            tracing::error!(
                                job_id = %job_id,
                                error = %msg,
                                "Job failed permanently"
                            );
                            if let Err(e) = queue.fail(job_id, &msg).await {
                                tracing::error!(
                                    job_id = %job_id,
                                    error = %e,
                                    "Failed to mark job as failed"
                                );
                            }
                        }
                        Err(JobExecutionError::Internal(err)) => {
                            let msg = err.to_string();
                            tracing::error!(
                                job_id = %job_id,
                                error = %msg,
                                "Job hit an internal error"
                            );
                            if let Err(e) = queue.fail(job_id, &msg).await {
                                tracing::error!(
                                    job_id = %job_id,
                                    error = %e,
                                    "Failed to mark job as failed"
                                );
                            }
                        }
                    }
                });
            }
            Ok(None) => {
                drop(permit);
                tracing::trace!("No jobs available");
            }
            Err(e) => {
                drop(permit);
                tracing::error!(error = %e, "Failed to dequeue job");
            }
        }
    }
}
