//! Driver notification reads and read-state updates.

use std::sync::Arc;

use tracing::debug;

use beyondtrips_core::error::AppError;
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::{DriverId, NotificationId};
use beyondtrips_database::repositories::notification::NotificationRepository;
use beyondtrips_entity::notification::model::DriverNotification;

/// Serves a driver's notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notifications: Arc<NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// List a driver's notifications.
    pub async fn list(
        &self,
        driver_id: DriverId,
        page: PageRequest,
    ) -> AppResult<PageResponse<DriverNotification>> {
        self.notifications.find_by_driver(driver_id, &page).await
    }

    /// Count a driver's unread notifications.
    pub async fn unread_count(&self, driver_id: DriverId) -> AppResult<i64> {
        self.notifications.count_unread(driver_id).await
    }

    /// Mark one notification read.
    ///
    /// The repository filters on the driver, so another driver's
    /// notification reads as not found rather than leaking its existence.
    pub async fn mark_read(&self, driver_id: DriverId, id: NotificationId) -> AppResult<()> {
        let updated = self.notifications.mark_read(id, driver_id).await?;
        if !updated {
            return Err(AppError::not_found("Notification not found or already read"));
        }
        Ok(())
    }

    /// Mark all of a driver's notifications read; returns how many changed.
    pub async fn mark_all_read(&self, driver_id: DriverId) -> AppResult<i64> {
        let count = self.notifications.mark_all_read(driver_id).await?;
        debug!(driver_id = %driver_id, count, "Marked notifications read");
        Ok(count)
    }
}
