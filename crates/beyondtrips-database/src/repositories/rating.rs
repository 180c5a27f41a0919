//! Rider rating repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::RatingId;
use beyondtrips_entity::rating::model::{CreateRating, DriverRating};

use super::driver::is_unique_violation;

/// Repository for rider rating operations.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    /// Create a new rating repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a rating, relying on the composite unique constraint for
    /// duplicate detection.
    ///
    /// There is deliberately no pre-insert existence probe; two racing
    /// submissions with the same `(driver_id, magazine_barcode,
    /// submission_key)` resolve at the constraint, and the loser gets a
    /// conflict error.
    pub async fn create(&self, data: &CreateRating) -> AppResult<DriverRating> {
        sqlx::query_as::<_, DriverRating>(
            "INSERT INTO driver_ratings \
             (driver_id, magazine_id, rater_name, rater_email, rater_phone, rating, review, \
              magazine_barcode, device_fingerprint, submission_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.magazine_id)
        .bind(&data.rater_name)
        .bind(&data.rater_email)
        .bind(&data.rater_phone)
        .bind(data.rating)
        .bind(&data.review)
        .bind(&data.magazine_barcode)
        .bind(&data.device_fingerprint)
        .bind(&data.submission_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("A review for this magazine has already been submitted")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create rating", e)
            }
        })
    }

    /// Set the coin-awarded flag inside an open transaction.
    pub async fn mark_coin_awarded_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: RatingId,
    ) -> AppResult<()> {
        sqlx::query("UPDATE driver_ratings SET btl_coin_awarded = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to flag rating as awarded", e)
            })?;
        Ok(())
    }
}
