//! Typed job payload definitions.

use beyondtrips_core::types::{DriverId, PickupId};
use serde::{Deserialize, Serialize};

use crate::notification::NotificationCategory;

/// Queue for reward side-effect jobs.
pub const QUEUE_REWARDS: &str = "rewards";
/// Queue for periodic maintenance jobs.
pub const QUEUE_MAINTENANCE: &str = "maintenance";

/// Typed payloads for known job types.
///
/// The serialized form carries the job type as a `"job_type"` tag, so a
/// job row's payload column is self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "job_type")]
pub enum JobPayload {
    /// Increment the scan/coin counters on a pickup.
    #[serde(rename = "reward_counters")]
    RewardCounters {
        /// The pickup whose counters to bump.
        pickup_id: PickupId,
    },
    /// Insert a driver notification.
    #[serde(rename = "driver_notify")]
    DriverNotify {
        /// Recipient driver.
        driver_id: DriverId,
        /// Notification category.
        category: NotificationCategory,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
        /// Priority level (optional).
        priority: Option<String>,
    },
    /// Record an audit trail event.
    #[serde(rename = "admin_audit")]
    AdminAudit {
        /// The event that occurred.
        event_type: String,
        /// Human-readable summary.
        message: String,
        /// Who caused the event.
        actor: String,
        /// Structured event details.
        details: Option<serde_json::Value>,
    },
    /// Notify drivers whose active pickups passed their due date.
    #[serde(rename = "overdue_pickup_sweep")]
    OverduePickupSweep,
    /// Delete scan events older than the cool-down horizon.
    #[serde(rename = "scan_event_prune")]
    ScanEventPrune,
    /// Delete terminal jobs past the retention period.
    #[serde(rename = "job_prune")]
    JobPrune,
}

impl JobPayload {
    /// Return the job type tag for this payload.
    pub fn job_type(&self) -> &'static str {
        match self {
            Self::RewardCounters { .. } => "reward_counters",
            Self::DriverNotify { .. } => "driver_notify",
            Self::AdminAudit { .. } => "admin_audit",
            Self::OverduePickupSweep => "overdue_pickup_sweep",
            Self::ScanEventPrune => "scan_event_prune",
            Self::JobPrune => "job_prune",
        }
    }

    /// Return the queue this payload belongs on.
    pub fn queue(&self) -> &'static str {
        match self {
            Self::RewardCounters { .. } | Self::DriverNotify { .. } | Self::AdminAudit { .. } => {
                QUEUE_REWARDS
            }
            Self::OverduePickupSweep | Self::ScanEventPrune | Self::JobPrune => QUEUE_MAINTENANCE,
        }
    }
}
