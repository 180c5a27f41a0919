//! Magazine pickup repository implementation.
//!
//! Every status write is a compare-and-set on the expected current
//! status; callers treat a `None` return as a transition conflict.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::{DriverId, MagazineId, PickupId};
use beyondtrips_entity::pickup::model::{CreatePickup, MagazinePickup};
use beyondtrips_entity::pickup::status::PickupStatus;

/// Repository for magazine pickup CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct PickupRepository {
    pool: PgPool,
}

impl PickupRepository {
    /// Create a new pickup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pickup request in `requested` status.
    pub async fn create(&self, data: &CreatePickup) -> AppResult<MagazinePickup> {
        sqlx::query_as::<_, MagazinePickup>(
            "INSERT INTO magazine_pickups (driver_id, magazine_id, quantity) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.magazine_id)
        .bind(data.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create pickup", e))
    }

    /// Find a pickup by ID.
    pub async fn find_by_id(&self, id: PickupId) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>("SELECT * FROM magazine_pickups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pickup", e))
    }

    /// List pickups for a driver, newest first.
    pub async fn find_by_driver(
        &self,
        driver_id: DriverId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MagazinePickup>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM magazine_pickups WHERE driver_id = $1")
                .bind(driver_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count pickups", e)
                })?;

        let pickups = sqlx::query_as::<_, MagazinePickup>(
            "SELECT * FROM magazine_pickups WHERE driver_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(driver_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pickups", e))?;

        Ok(PageResponse::new(pickups, page, total as u64))
    }

    /// List all pickups, optionally filtered by status, newest first.
    pub async fn find_all(
        &self,
        status: Option<PickupStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MagazinePickup>> {
        let (total, pickups) = match status {
            Some(status) => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM magazine_pickups WHERE status = $1",
                )
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count pickups", e)
                })?;

                let pickups = sqlx::query_as::<_, MagazinePickup>(
                    "SELECT * FROM magazine_pickups WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(status)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list pickups", e)
                })?;

                (total, pickups)
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM magazine_pickups")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to count pickups", e)
                    })?;

                let pickups = sqlx::query_as::<_, MagazinePickup>(
                    "SELECT * FROM magazine_pickups \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list pickups", e)
                })?;

                (total, pickups)
            }
        };

        Ok(PageResponse::new(pickups, page, total as u64))
    }

    /// Find the scannable (`picked_up` or `active`) pickup for a magazine.
    ///
    /// The most recently activated custody wins when several exist.
    pub async fn find_scannable(
        &self,
        magazine_id: MagazineId,
    ) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "SELECT * FROM magazine_pickups \
             WHERE magazine_id = $1 AND status IN ('picked_up', 'active') \
             ORDER BY activated_at DESC NULLS LAST, created_at DESC LIMIT 1",
        )
        .bind(magazine_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find scannable pickup", e)
        })
    }

    /// Approve a requested pickup inside an open transaction.
    ///
    /// Stamps the codes and timestamps issued at approval. Returns `None`
    /// when the pickup is not currently `requested`.
    pub async fn approve_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: PickupId,
        qr_code: &str,
        verification_code: &str,
        return_due_at: DateTime<Utc>,
    ) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups \
             SET status = 'approved', qr_code = $2, verification_code = $3, \
                 approved_at = NOW(), return_due_at = $4, updated_at = NOW() \
             WHERE id = $1 AND status = 'requested' RETURNING *",
        )
        .bind(id)
        .bind(qr_code)
        .bind(verification_code)
        .bind(return_due_at)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve pickup", e))
    }

    /// Reject a pickup inside an open transaction.
    ///
    /// Legal from `requested` or `approved`. Returns `None` on a
    /// transition conflict.
    pub async fn reject_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: PickupId,
        reason: &str,
    ) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups \
             SET status = 'rejected', rejection_reason = $2, updated_at = NOW() \
             WHERE id = $1 AND status IN ('requested', 'approved') RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject pickup", e))
    }

    /// Confirm physical collection: `approved` to `picked_up`.
    pub async fn confirm_pickup(&self, id: PickupId) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups \
             SET status = 'picked_up', picked_up_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'approved' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm pickup", e))
    }

    /// Activate the magazine barcode: `picked_up` to `active`.
    pub async fn activate(
        &self,
        id: PickupId,
        activation_barcode: &str,
    ) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups \
             SET status = 'active', activation_barcode = $2, activated_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'picked_up' RETURNING *",
        )
        .bind(id)
        .bind(activation_barcode)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate pickup", e))
    }

    /// Mark a pickup returned inside an open transaction: `active` to `returned`.
    pub async fn return_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: PickupId,
    ) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups \
             SET status = 'returned', actual_return_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to return pickup", e))
    }

    /// Mark an active pickup lost.
    pub async fn mark_lost(&self, id: PickupId) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups SET status = 'lost', updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark pickup lost", e))
    }

    /// Mark an active pickup damaged.
    pub async fn mark_damaged(&self, id: PickupId) -> AppResult<Option<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "UPDATE magazine_pickups SET status = 'damaged', updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark pickup damaged", e)
        })
    }

    /// Atomically bump the scan and coin counters on a pickup.
    pub async fn increment_counters(
        &self,
        id: PickupId,
        scans: i32,
        coins: i32,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE magazine_pickups \
             SET rider_scans = rider_scans + $2, btl_coins_earned = btl_coins_earned + $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(scans)
        .bind(coins)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment pickup counters", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Find active pickups whose return date has passed.
    pub async fn find_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<MagazinePickup>> {
        sqlx::query_as::<_, MagazinePickup>(
            "SELECT * FROM magazine_pickups \
             WHERE status = 'active' AND return_due_at IS NOT NULL AND return_due_at < $1 \
             ORDER BY return_due_at ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find overdue pickups", e)
        })
    }
}
