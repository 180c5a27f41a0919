//! Beyond Trips server binary.
//!
//! Loads configuration, brings up logging, connects to PostgreSQL, then
//! hands off to the API layer, which owns the rest of the wiring.

use tracing_subscriber::{EnvFilter, fmt};

use beyondtrips_core::config::{AppConfig, LogFormat};
use beyondtrips_core::error::AppError;
use beyondtrips_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}

/// Pick the environment from `BEYONDTRIPS_ENV` and load its config.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BEYONDTRIPS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Beyond Trips v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    beyondtrips_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Hand off to the API layer ────────────────────────
    beyondtrips_api::run_server(config, db).await
}
