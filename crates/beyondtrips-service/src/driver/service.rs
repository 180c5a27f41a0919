//! Driver onboarding and lookup.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::DriverId;
use beyondtrips_database::repositories::driver::DriverRepository;
use beyondtrips_database::repositories::notification::NotificationRepository;
use beyondtrips_entity::driver::model::{CreateDriver, Driver};
use beyondtrips_entity::notification::{CreateNotification, NotificationCategory};

use crate::context::RequestContext;

/// Manages driver accounts.
#[derive(Debug, Clone)]
pub struct DriverService {
    pool: PgPool,
    drivers: Arc<DriverRepository>,
    notifications: Arc<NotificationRepository>,
}

impl DriverService {
    /// Create a new driver service.
    pub fn new(
        pool: PgPool,
        drivers: Arc<DriverRepository>,
        notifications: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            pool,
            drivers,
            notifications,
        }
    }

    /// Register a driver and write their welcome notification atomically.
    pub async fn onboard(&self, ctx: &RequestContext, data: CreateDriver) -> AppResult<Driver> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let driver = self.drivers.create_in_tx(&mut tx, &data).await?;

        self.notifications
            .create_in_tx(
                &mut tx,
                &CreateNotification {
                    driver_id: driver.id,
                    category: NotificationCategory::System,
                    title: "Welcome to Beyond Trips".to_string(),
                    message: "Your driver account is ready. Request a magazine pickup to start \
                              earning BTL coins."
                        .to_string(),
                    priority: None,
                },
            )
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            driver_id = %driver.id,
            email = %driver.email,
            actor = %ctx.actor_label(),
            "Driver onboarded"
        );
        Ok(driver)
    }

    /// Fetch a driver by ID.
    pub async fn get(&self, id: DriverId) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Driver not found"))
    }

    /// List drivers (admin).
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Driver>> {
        self.drivers.find_all(&page).await
    }
}
