//! Audit event repository implementation.

use sqlx::PgPool;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_entity::audit::model::{AuditEvent, CreateAuditEvent};

/// Repository for the append-only audit trail.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    /// Create a new audit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an audit event.
    pub async fn create(&self, data: &CreateAuditEvent) -> AppResult<AuditEvent> {
        sqlx::query_as::<_, AuditEvent>(
            "INSERT INTO audit_events (event_type, message, actor, payload) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.event_type)
        .bind(&data.message)
        .bind(&data.actor)
        .bind(&data.payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record audit event", e)
        })
    }
}
