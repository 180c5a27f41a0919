//! Reward side-effect job handlers.
//!
//! These run the cheap follow-ups of a coin award outside the award
//! transaction: counter bumps, the driver notification, and the audit
//! trail entry. Each handler parses the typed payload and treats a
//! mismatched tag as a permanent failure.

use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use beyondtrips_database::repositories::audit::AuditRepository;
use beyondtrips_database::repositories::notification::NotificationRepository;
use beyondtrips_database::repositories::pickup::PickupRepository;
use beyondtrips_entity::audit::model::CreateAuditEvent;
use beyondtrips_entity::job::model::Job;
use beyondtrips_entity::job::payload::JobPayload;
use beyondtrips_entity::notification::model::CreateNotification;

use crate::executor::{JobExecutionError, JobHandler};

/// Parse a job's payload into the typed form.
fn parse_payload(job: &Job) -> Result<JobPayload, JobExecutionError> {
    serde_json::from_value(job.payload.clone())
        .map_err(|e| JobExecutionError::Permanent(format!("Invalid job payload: {e}")))
}

/// Bumps the scan and coin counters on a pickup after an award.
#[derive(Debug)]
pub struct RewardCounterHandler {
    pickups: Arc<PickupRepository>,
}

impl RewardCounterHandler {
    /// Create a new counter handler.
    pub fn new(pickups: Arc<PickupRepository>) -> Self {
        Self { pickups }
    }
}

#[async_trait]
impl JobHandler for RewardCounterHandler {
    fn job_type(&self) -> &str {
        "reward_counters"
    }

    async fn execute(&self, job: &Job) -> Result<(), JobExecutionError> {
        let JobPayload::RewardCounters { pickup_id } = parse_payload(job)? else {
            return Err(JobExecutionError::Permanent(format!(
                "Unexpected payload for job type '{}'",
                job.job_type
            )));
        };

        let updated = self
            .pickups
            .increment_counters(pickup_id, 1, 1)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Counter update failed: {e}")))?;

        if !updated {
            return Err(JobExecutionError::Permanent(format!(
                "Pickup {pickup_id} no longer exists"
            )));
        }

        tracing::info!(pickup_id = %pickup_id, "Pickup counters bumped");
        Ok(())
    }
}

/// Delivers a queued driver notification.
#[derive(Debug)]
pub struct DriverNotifyHandler {
    notifications: Arc<NotificationRepository>,
}

impl DriverNotifyHandler {
    /// Create a new notification handler.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl JobHandler for DriverNotifyHandler {
    fn job_type(&self) -> &str {
        "driver_notify"
    }

    async fn execute(&self, job: &Job) -> Result<(), JobExecutionError> {
        let JobPayload::DriverNotify {
            driver_id,
            category,
            title,
            message,
            priority,
        } = parse_payload(job)?
        else {
            return Err(JobExecutionError::Permanent(format!(
                "Unexpected payload for job type '{}'",
                job.job_type
            )));
        };

        let notification = self
            .notifications
            .create(&CreateNotification {
                driver_id,
                category,
                title,
                message,
                priority,
            })
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Notification insert failed: {e}"))
            })?;

        tracing::info!(
            notification_id = %notification.id,
            driver_id = %driver_id,
            "Driver notification delivered"
        );
        Ok(())
    }
}

/// Records a queued audit trail event.
#[derive(Debug)]
pub struct AdminAuditHandler {
    audits: Arc<AuditRepository>,
}

impl AdminAuditHandler {
    /// Create a new audit handler.
    pub fn new(audits: Arc<AuditRepository>) -> Self {
        Self { audits }
    }
}

#[async_trait]
impl JobHandler for AdminAuditHandler {
    fn job_type(&self) -> &str {
        "admin_audit"
    }

    async fn execute(&self, job: &Job) -> Result<(), JobExecutionError> {
        let JobPayload::AdminAudit {
            event_type,
            message,
            actor,
            details,
        } = parse_payload(job)?
        else {
            return Err(JobExecutionError::Permanent(format!(
                "Unexpected payload for job type '{}'",
                job.job_type
            )));
        };

        let event = self
            .audits
            .create(&CreateAuditEvent {
                event_type,
                message,
                actor,
                payload: details,
            })
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Audit insert failed: {e}")))?;

        tracing::info!(
            audit_id = %event.id,
            event_type = %event.event_type,
            "Audit event recorded"
        );
        Ok(())
    }
}
