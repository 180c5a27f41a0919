//! Pickup lifecycle orchestration.
//!
//! Transitions that notify the driver (approve, reject, return) run the
//! compare-and-set status write and the notification job enqueue in one
//! transaction, so the notification cannot be lost while the state
//! change persists.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use beyondtrips_core::config::pickup::PickupConfig;
use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::{DriverId, MagazineId, PickupId};
use beyondtrips_database::repositories::driver::DriverRepository;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_database::repositories::magazine::MagazineRepository;
use beyondtrips_database::repositories::pickup::PickupRepository;
use beyondtrips_entity::job::payload::JobPayload;
use beyondtrips_entity::notification::NotificationCategory;
use beyondtrips_entity::pickup::model::{CreatePickup, MagazinePickup};
use beyondtrips_entity::pickup::status::PickupStatus;

use crate::context::RequestContext;
use crate::outbox;
use super::codes;

/// Orchestrates the pickup state machine.
#[derive(Debug, Clone)]
pub struct PickupService {
    pool: PgPool,
    pickups: Arc<PickupRepository>,
    drivers: Arc<DriverRepository>,
    magazines: Arc<MagazineRepository>,
    jobs: Arc<JobRepository>,
    config: PickupConfig,
    job_max_attempts: i32,
}

impl PickupService {
    /// Create a new pickup service.
    pub fn new(
        pool: PgPool,
        pickups: Arc<PickupRepository>,
        drivers: Arc<DriverRepository>,
        magazines: Arc<MagazineRepository>,
        jobs: Arc<JobRepository>,
        config: PickupConfig,
        job_max_attempts: i32,
    ) -> Self {
        Self {
            pool,
            pickups,
            drivers,
            magazines,
            jobs,
            config,
            job_max_attempts,
        }
    }

    /// Request a pickup on behalf of a driver.
    pub async fn request_pickup(
        &self,
        ctx: &RequestContext,
        driver_id: DriverId,
        magazine_id: MagazineId,
        quantity: i32,
    ) -> AppResult<MagazinePickup> {
        if quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::not_found("Driver not found"))?;
        if !driver.can_request_pickup() {
            return Err(AppError::authorization("Driver account is suspended"));
        }

        let magazine = self
            .magazines
            .find_by_id(magazine_id)
            .await?
            .ok_or_else(|| AppError::not_found("Magazine not found"))?;
        if !magazine.status.is_scannable() {
            return Err(AppError::validation("Magazine is not published"));
        }

        let pickup = self
            .pickups
            .create(&CreatePickup {
                driver_id,
                magazine_id,
                quantity,
            })
            .await?;

        info!(
            pickup_id = %pickup.id,
            driver_id = %driver_id,
            magazine = %magazine.barcode,
            quantity,
            actor = %ctx.actor_label(),
            "Pickup requested"
        );
        Ok(pickup)
    }

    /// Fetch a pickup owned by the given driver.
    pub async fn get_owned(&self, driver_id: DriverId, id: PickupId) -> AppResult<MagazinePickup> {
        let pickup = self
            .pickups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pickup not found"))?;
        if pickup.driver_id != driver_id {
            return Err(AppError::authorization("Pickup belongs to another driver"));
        }
        Ok(pickup)
    }

    /// List a driver's pickups.
    pub async fn list_for_driver(
        &self,
        driver_id: DriverId,
        page: PageRequest,
    ) -> AppResult<PageResponse<MagazinePickup>> {
        self.pickups.find_by_driver(driver_id, &page).await
    }

    /// List all pickups, optionally filtered by status (admin).
    pub async fn list_all(
        &self,
        status: Option<PickupStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<MagazinePickup>> {
        self.pickups.find_all(status, &page).await
    }

    /// Approve a requested pickup (admin).
    ///
    /// Generates the QR token and verification code, stamps the return
    /// window, and enqueues the driver notification in one transaction.
    pub async fn approve(&self, ctx: &RequestContext, id: PickupId) -> AppResult<MagazinePickup> {
        let pickup = self
            .pickups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pickup not found"))?;

        let qr_code = codes::generate_qr_token();
        let verification_code = codes::generate_verification_code();
        let return_due_at = Utc::now() + Duration::days(self.config.return_window_days);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let approved = self
            .pickups
            .approve_in_tx(&mut tx, id, &qr_code, &verification_code, return_due_at)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "Cannot approve pickup in status '{}'",
                    pickup.status
                ))
            })?;

        let notify = JobPayload::DriverNotify {
            driver_id: approved.driver_id,
            category: NotificationCategory::Pickup,
            title: "Pickup Approved".to_string(),
            message: format!(
                "Your pickup request has been approved. Use verification code {verification_code} when collecting your copies."
            ),
            priority: Some("high".to_string()),
        };
        self.jobs
            .enqueue_in_tx(&mut tx, &outbox::create_job(&notify, self.job_max_attempts)?)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            pickup_id = %approved.id,
            driver_id = %approved.driver_id,
            actor = %ctx.actor_label(),
            "Pickup approved"
        );
        Ok(approved)
    }

    /// Reject a pickup with a reason (admin).
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        id: PickupId,
        reason: &str,
    ) -> AppResult<MagazinePickup> {
        let pickup = self
            .pickups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pickup not found"))?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let rejected = self
            .pickups
            .reject_in_tx(&mut tx, id, reason)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "Cannot reject pickup in status '{}'",
                    pickup.status
                ))
            })?;

        let notify = JobPayload::DriverNotify {
            driver_id: rejected.driver_id,
            category: NotificationCategory::Pickup,
            title: "Pickup Rejected".to_string(),
            message: format!("Your pickup request was rejected: {reason}"),
            priority: Some("normal".to_string()),
        };
        self.jobs
            .enqueue_in_tx(&mut tx, &outbox::create_job(&notify, self.job_max_attempts)?)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            pickup_id = %rejected.id,
            driver_id = %rejected.driver_id,
            actor = %ctx.actor_label(),
            "Pickup rejected"
        );
        Ok(rejected)
    }

    /// Confirm physical collection with the verification code (driver).
    pub async fn confirm_pickup(
        &self,
        ctx: &RequestContext,
        driver_id: DriverId,
        id: PickupId,
        verification_code: &str,
    ) -> AppResult<MagazinePickup> {
        let pickup = self.get_owned(driver_id, id).await?;

        match pickup.verification_code.as_deref() {
            Some(expected) if expected == verification_code => {}
            Some(_) => return Err(AppError::validation("Invalid verification code")),
            None => {
                return Err(AppError::conflict(format!(
                    "Cannot confirm pickup in status '{}'",
                    pickup.status
                )));
            }
        }

        let confirmed = self.pickups.confirm_pickup(id).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Cannot confirm pickup in status '{}'",
                pickup.status
            ))
        })?;

        info!(
            pickup_id = %confirmed.id,
            actor = %ctx.actor_label(),
            "Pickup collection confirmed"
        );
        Ok(confirmed)
    }

    /// Activate the magazine barcode (driver).
    ///
    /// The scanned barcode must match the magazine assigned to the
    /// pickup; riders can scan the copy once this succeeds.
    pub async fn activate(
        &self,
        ctx: &RequestContext,
        driver_id: DriverId,
        id: PickupId,
        barcode: &str,
    ) -> AppResult<MagazinePickup> {
        let pickup = self.get_owned(driver_id, id).await?;

        let magazine = self
            .magazines
            .find_by_id(pickup.magazine_id)
            .await?
            .ok_or_else(|| AppError::internal("Pickup references a missing magazine"))?;
        if magazine.barcode != barcode {
            return Err(AppError::validation(
                "Barcode does not match the assigned magazine",
            ));
        }

        let activated = self.pickups.activate(id, barcode).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Cannot activate pickup in status '{}'",
                pickup.status
            ))
        })?;

        info!(
            pickup_id = %activated.id,
            barcode = %barcode,
            actor = %ctx.actor_label(),
            "Pickup activated"
        );
        Ok(activated)
    }

    /// Mark an active pickup returned (owning driver or admin).
    ///
    /// `expected_driver` is `None` for admin calls.
    pub async fn return_pickup(
        &self,
        ctx: &RequestContext,
        id: PickupId,
        expected_driver: Option<DriverId>,
    ) -> AppResult<MagazinePickup> {
        let pickup = match expected_driver {
            Some(driver_id) => self.get_owned(driver_id, id).await?,
            None => self
                .pickups
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Pickup not found"))?,
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let returned = self
            .pickups
            .return_in_tx(&mut tx, id)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "Cannot return pickup in status '{}'",
                    pickup.status
                ))
            })?;

        let notify = JobPayload::DriverNotify {
            driver_id: returned.driver_id,
            category: NotificationCategory::Pickup,
            title: "Pickup Returned".to_string(),
            message: "Your magazine return has been recorded. Thank you!".to_string(),
            priority: Some("normal".to_string()),
        };
        self.jobs
            .enqueue_in_tx(&mut tx, &outbox::create_job(&notify, self.job_max_attempts)?)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            pickup_id = %returned.id,
            actor = %ctx.actor_label(),
            "Pickup returned"
        );
        Ok(returned)
    }

    /// Mark an active pickup lost (admin).
    pub async fn mark_lost(&self, ctx: &RequestContext, id: PickupId) -> AppResult<MagazinePickup> {
        let pickup = self
            .pickups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pickup not found"))?;

        let lost = self.pickups.mark_lost(id).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Cannot mark pickup lost in status '{}'",
                pickup.status
            ))
        })?;

        info!(pickup_id = %lost.id, actor = %ctx.actor_label(), "Pickup marked lost");
        Ok(lost)
    }

    /// Mark an active pickup damaged (admin).
    pub async fn mark_damaged(
        &self,
        ctx: &RequestContext,
        id: PickupId,
    ) -> AppResult<MagazinePickup> {
        let pickup = self
            .pickups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pickup not found"))?;

        let damaged = self.pickups.mark_damaged(id).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Cannot mark pickup damaged in status '{}'",
                pickup.status
            ))
        })?;

        info!(pickup_id = %damaged.id, actor = %ctx.actor_label(), "Pickup marked damaged");
        Ok(damaged)
    }
}
