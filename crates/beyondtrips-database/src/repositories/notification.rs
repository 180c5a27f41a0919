//! Driver notification repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::{DriverId, NotificationId};
use beyondtrips_entity::notification::model::{CreateNotification, DriverNotification};

/// Repository for driver notification operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification.
    pub async fn create(&self, data: &CreateNotification) -> AppResult<DriverNotification> {
        sqlx::query_as::<_, DriverNotification>(
            "INSERT INTO driver_notifications (driver_id, category, title, message, priority) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.category.as_str())
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// Insert a notification inside an open transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateNotification,
    ) -> AppResult<DriverNotification> {
        sqlx::query_as::<_, DriverNotification>(
            "INSERT INTO driver_notifications (driver_id, category, title, message, priority) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.category.as_str())
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.priority)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// List a driver's notifications, newest first.
    pub async fn find_by_driver(
        &self,
        driver_id: DriverId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DriverNotification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM driver_notifications WHERE driver_id = $1")
                .bind(driver_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let notifications = sqlx::query_as::<_, DriverNotification>(
            "SELECT * FROM driver_notifications WHERE driver_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(driver_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(notifications, page, total as u64))
    }

    /// Count a driver's unread notifications.
    pub async fn count_unread(&self, driver_id: DriverId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM driver_notifications \
             WHERE driver_id = $1 AND is_read = FALSE",
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count unread notifications", e)
        })
    }

    /// Mark one notification read; the driver filter enforces ownership.
    pub async fn mark_read(&self, id: NotificationId, driver_id: DriverId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE driver_notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND driver_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(driver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a driver's notifications read.
    pub async fn mark_all_read(&self, driver_id: DriverId) -> AppResult<i64> {
        let result = sqlx::query(
            "UPDATE driver_notifications SET is_read = TRUE, read_at = NOW() \
             WHERE driver_id = $1 AND is_read = FALSE",
        )
        .bind(driver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notifications read", e)
        })?;
        Ok(result.rows_affected() as i64)
    }
}
