//! Schema migrations, embedded into the binary at compile time.

use sqlx::PgPool;
use tracing::info;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;

/// Apply any migrations the database has not seen yet.
///
/// Safe to call on every startup; already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(known = migrator.migrations.len(), "Applying schema migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Schema is up to date");
    Ok(())
}
