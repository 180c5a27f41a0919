//! Driver earnings ledger repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::DriverId;
use beyondtrips_entity::earning::model::{CreateEarning, DriverEarning, EarningTotals};

/// Repository for the append-only driver earnings ledger.
#[derive(Debug, Clone)]
pub struct EarningRepository {
    pool: PgPool,
}

impl EarningRepository {
    /// Create a new earning repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a ledger entry inside an open transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateEarning,
    ) -> AppResult<DriverEarning> {
        sqlx::query_as::<_, DriverEarning>(
            "INSERT INTO driver_earnings \
             (driver_id, scans, points, amount_ngn, entry_type, source, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.scans)
        .bind(data.points)
        .bind(data.amount_ngn)
        .bind(&data.entry_type)
        .bind(&data.source)
        .bind(&data.status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create earning", e))
    }

    /// List a driver's ledger entries, newest first.
    pub async fn find_by_driver(
        &self,
        driver_id: DriverId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DriverEarning>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM driver_earnings WHERE driver_id = $1")
                .bind(driver_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count earnings", e)
                })?;

        let earnings = sqlx::query_as::<_, DriverEarning>(
            "SELECT * FROM driver_earnings WHERE driver_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(driver_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list earnings", e))?;

        Ok(PageResponse::new(earnings, page, total as u64))
    }

    /// Aggregate a driver's ledger totals.
    pub async fn totals_for_driver(&self, driver_id: DriverId) -> AppResult<EarningTotals> {
        sqlx::query_as::<_, EarningTotals>(
            "SELECT COUNT(*) AS total_entries, \
                    COALESCE(SUM(points), 0)::BIGINT AS total_points, \
                    COALESCE(SUM(amount_ngn), 0)::BIGINT AS total_amount_ngn \
             FROM driver_earnings WHERE driver_id = $1",
        )
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to total earnings", e))
    }
}
