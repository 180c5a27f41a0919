//! BTL coin award repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::{AwardId, DriverId, EarningId};
use beyondtrips_entity::reward::model::{BtlCoinAward, CreateAward};

/// Repository for BTL coin award operations.
#[derive(Debug, Clone)]
pub struct AwardRepository {
    pool: PgPool,
}

impl AwardRepository {
    /// Create a new award repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an award inside an open transaction, keyed on the rating.
    ///
    /// `ON CONFLICT (rating_id) DO NOTHING` makes the insert idempotent:
    /// `None` means an award for this rating already exists and nothing
    /// was written.
    pub async fn insert_awarded_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateAward,
    ) -> AppResult<Option<BtlCoinAward>> {
        sqlx::query_as::<_, BtlCoinAward>(
            "INSERT INTO btl_coin_awards \
             (driver_id, magazine_id, magazine_barcode, rating_id, amount) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (rating_id) DO NOTHING RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.magazine_id)
        .bind(&data.magazine_barcode)
        .bind(data.rating_id)
        .bind(data.amount)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert award", e))
    }

    /// Link an award to its ledger entry and mark it processed, inside an
    /// open transaction.
    pub async fn mark_processed_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: AwardId,
        earning_id: EarningId,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE btl_coin_awards \
             SET status = 'processed', earning_id = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(earning_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark award processed", e)
        })?;
        Ok(())
    }

    /// List a driver's awards, newest first.
    pub async fn find_by_driver(
        &self,
        driver_id: DriverId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BtlCoinAward>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM btl_coin_awards WHERE driver_id = $1")
                .bind(driver_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count awards", e)
                })?;

        let awards = sqlx::query_as::<_, BtlCoinAward>(
            "SELECT * FROM btl_coin_awards WHERE driver_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(driver_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list awards", e))?;

        Ok(PageResponse::new(awards, page, total as u64))
    }
}
