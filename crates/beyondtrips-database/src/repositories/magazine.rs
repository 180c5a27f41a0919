//! Magazine repository implementation.

use sqlx::PgPool;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::MagazineId;
use beyondtrips_entity::magazine::model::{CreateMagazine, Magazine};

use super::driver::is_unique_violation;

/// Repository for magazine CRUD operations.
#[derive(Debug, Clone)]
pub struct MagazineRepository {
    pool: PgPool,
}

impl MagazineRepository {
    /// Create a new magazine repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a magazine edition in `draft` status.
    ///
    /// A duplicate barcode is reported as a conflict.
    pub async fn create(&self, data: &CreateMagazine) -> AppResult<Magazine> {
        sqlx::query_as::<_, Magazine>(
            "INSERT INTO magazines (title, edition, barcode) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.edition)
        .bind(&data.barcode)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!(
                    "A magazine with barcode '{}' already exists",
                    data.barcode
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create magazine", e)
            }
        })
    }

    /// Find a magazine by ID.
    pub async fn find_by_id(&self, id: MagazineId) -> AppResult<Option<Magazine>> {
        sqlx::query_as::<_, Magazine>("SELECT * FROM magazines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find magazine", e))
    }

    /// Find a magazine by its barcode.
    pub async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Magazine>> {
        sqlx::query_as::<_, Magazine>("SELECT * FROM magazines WHERE barcode = $1")
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find magazine by barcode", e)
            })
    }

    /// Publish a draft magazine (compare-and-set on `draft`).
    ///
    /// Returns `None` when the magazine is missing or not in `draft`.
    pub async fn publish(&self, id: MagazineId) -> AppResult<Option<Magazine>> {
        sqlx::query_as::<_, Magazine>(
            "UPDATE magazines SET status = 'published', published_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'draft' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to publish magazine", e))
    }

    /// List magazines with pagination, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Magazine>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM magazines")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count magazines", e)
            })?;

        let magazines = sqlx::query_as::<_, Magazine>(
            "SELECT * FROM magazines ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list magazines", e))?;

        Ok(PageResponse::new(magazines, page, total as u64))
    }
}
