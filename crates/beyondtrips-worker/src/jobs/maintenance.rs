//! Periodic maintenance job handlers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing;

use beyondtrips_database::repositories::audit::AuditRepository;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_database::repositories::notification::NotificationRepository;
use beyondtrips_database::repositories::pickup::PickupRepository;
use beyondtrips_database::repositories::scan::ScanRepository;
use beyondtrips_entity::audit::model::CreateAuditEvent;
use beyondtrips_entity::job::model::Job;
use beyondtrips_entity::notification::model::CreateNotification;
use beyondtrips_entity::notification::NotificationCategory;

use crate::executor::{JobExecutionError, JobHandler};

/// Scan events older than this are no longer needed for cool-down checks.
const SCAN_RETENTION_HOURS: i64 = 24;

/// Terminal jobs are kept this long for inspection before pruning.
const JOB_RETENTION_DAYS: i64 = 7;

/// Notifies drivers whose active pickups passed their return date.
#[derive(Debug)]
pub struct OverduePickupSweepHandler {
    pickups: Arc<PickupRepository>,
    notifications: Arc<NotificationRepository>,
    audits: Arc<AuditRepository>,
}

impl OverduePickupSweepHandler {
    /// Create a new overdue sweep handler.
    pub fn new(
        pickups: Arc<PickupRepository>,
        notifications: Arc<NotificationRepository>,
        audits: Arc<AuditRepository>,
    ) -> Self {
        Self {
            pickups,
            notifications,
            audits,
        }
    }
}

#[async_trait]
impl JobHandler for OverduePickupSweepHandler {
    fn job_type(&self) -> &str {
        "overdue_pickup_sweep"
    }

    async fn execute(&self, _job: &Job) -> Result<(), JobExecutionError> {
        let now = Utc::now();
        let overdue = self
            .pickups
            .find_overdue(now)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Overdue lookup failed: {e}")))?;

        if overdue.is_empty() {
            tracing::info!("Overdue sweep found no pickups");
            return Ok(());
        }

        let mut notified = 0_u64;
        for pickup in &overdue {
            let due = match pickup.return_due_at {
                Some(due) => due,
                None => continue,
            };

            self.notifications
                .create(&CreateNotification {
                    driver_id: pickup.driver_id,
                    category: NotificationCategory::Pickup,
                    title: "Magazine Return Overdue".to_string(),
                    message: format!(
                        "Your magazine return was due on {}. Please return your copies as soon \
                         as possible.",
                        due.format("%Y-%m-%d")
                    ),
                    priority: Some("high".to_string()),
                })
                .await
                .map_err(|e| {
                    JobExecutionError::Transient(format!("Overdue notification failed: {e}"))
                })?;
            notified += 1;
        }

        self.audits
            .create(&CreateAuditEvent {
                event_type: "pickup.overdue_sweep".to_string(),
                message: format!("Overdue sweep notified {notified} driver(s)"),
                actor: "system".to_string(),
                payload: Some(serde_json::json!({
                    "overdue_count": overdue.len(),
                    "notified": notified,
                })),
            })
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Sweep audit failed: {e}")))?;

        tracing::info!(
            overdue = overdue.len(),
            notified,
            "Overdue pickup sweep complete"
        );
        Ok(())
    }
}

/// Deletes scan events past the cool-down retention horizon.
#[derive(Debug)]
pub struct ScanEventPruneHandler {
    scans: Arc<ScanRepository>,
}

impl ScanEventPruneHandler {
    /// Create a new scan prune handler.
    pub fn new(scans: Arc<ScanRepository>) -> Self {
        Self { scans }
    }
}

#[async_trait]
impl JobHandler for ScanEventPruneHandler {
    fn job_type(&self) -> &str {
        "scan_event_prune"
    }

    async fn execute(&self, _job: &Job) -> Result<(), JobExecutionError> {
        let before = Utc::now() - Duration::hours(SCAN_RETENTION_HOURS);
        let removed = self
            .scans
            .prune_older_than(before)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Scan prune failed: {e}")))?;

        tracing::info!(removed, "Scan events pruned");
        Ok(())
    }
}

/// Deletes terminal jobs past the retention period.
#[derive(Debug)]
pub struct JobPruneHandler {
    jobs: Arc<JobRepository>,
}

impl JobPruneHandler {
    /// Create a new job prune handler.
    pub fn new(jobs: Arc<JobRepository>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl JobHandler for JobPruneHandler {
    fn job_type(&self) -> &str {
        "job_prune"
    }

    async fn execute(&self, _job: &Job) -> Result<(), JobExecutionError> {
        let before = Utc::now() - Duration::days(JOB_RETENTION_DAYS);
        let removed = self
            .jobs
            .prune_terminal(before)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Job prune failed: {e}")))?;

        tracing::info!(removed, "Terminal jobs pruned");
        Ok(())
    }
}
