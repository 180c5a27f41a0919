//! Driver repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::DriverId;
use beyondtrips_entity::driver::model::{CreateDriver, Driver};

/// Repository for driver CRUD operations.
#[derive(Debug, Clone)]
pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    /// Create a new driver repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a driver by ID.
    pub async fn find_by_id(&self, id: DriverId) -> AppResult<Option<Driver>> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find driver", e))
    }

    /// Insert a driver inside an open transaction.
    ///
    /// A duplicate email is reported as a conflict.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateDriver,
    ) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            "INSERT INTO drivers (full_name, email, phone) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!("A driver with email '{}' already exists", data.email))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create driver", e)
            }
        })
    }

    /// List drivers with pagination, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Driver>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count drivers", e)
            })?;

        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list drivers", e))?;

        Ok(PageResponse::new(drivers, page, total as u64))
    }
}

/// Check whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
