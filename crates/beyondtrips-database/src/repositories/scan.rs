//! QR scan event repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::DriverId;
use beyondtrips_entity::scan::model::{CreateScan, MagazineScan};

/// Repository for QR scan events.
#[derive(Debug, Clone)]
pub struct ScanRepository {
    pool: PgPool,
}

impl ScanRepository {
    /// Create a new scan repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a scan event.
    pub async fn create(&self, data: &CreateScan) -> AppResult<MagazineScan> {
        sqlx::query_as::<_, MagazineScan>(
            "INSERT INTO magazine_scans \
             (driver_id, magazine_id, magazine_barcode, device_fingerprint) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.driver_id)
        .bind(data.magazine_id)
        .bind(&data.magazine_barcode)
        .bind(&data.device_fingerprint)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record scan", e))
    }

    /// Check for a scan by the same device within the cool-down window.
    pub async fn exists_recent(
        &self,
        driver_id: DriverId,
        barcode: &str,
        device_fingerprint: &str,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM magazine_scans \
                WHERE driver_id = $1 AND magazine_barcode = $2 \
                  AND device_fingerprint = $3 AND created_at > $4)",
        )
        .bind(driver_id)
        .bind(barcode)
        .bind(device_fingerprint)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check recent scans", e))
    }

    /// Delete scan events older than the given horizon.
    pub async fn prune_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM magazine_scans WHERE created_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to prune scans", e))?;
        Ok(result.rows_affected())
    }
}
