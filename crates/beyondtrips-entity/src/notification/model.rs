//! Driver notification entity model.

use beyondtrips_core::types::{DriverId, NotificationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::NotificationCategory;

/// A notification delivered to a driver's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverNotification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient driver.
    pub driver_id: DriverId,
    /// Notification category (`"pickup"`, `"reward"`, `"system"`).
    pub category: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Priority level (`"normal"` or `"high"`).
    pub priority: Option<String>,
    /// Whether the driver has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl DriverNotification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a new driver notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient driver.
    pub driver_id: DriverId,
    /// Notification category.
    pub category: NotificationCategory,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Priority level (optional).
    pub priority: Option<String>,
}
