//! Application configuration.
//!
//! One TOML tree, split into sections that map onto sub-modules here.
//! Every tunable the services read (coin value, return window, scan
//! cool-down, worker backoff) lives in configuration rather than in
//! code, so operators can adjust policy without a rebuild.

pub mod auth;
pub mod database;
pub mod logging;
pub mod pickup;
pub mod rewards;
pub mod server;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::pickup::PickupConfig;
pub use self::rewards::RewardsConfig;
pub use self::server::{CorsConfig, ServerConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root configuration, the deserialization target for the merged
/// sources produced by [`AppConfig::load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener and CORS.
    pub server: ServerConfig,
    /// PostgreSQL pool.
    pub database: DatabaseConfig,
    /// Token signing and password hashing.
    pub auth: AuthConfig,
    /// Pickup lifecycle windows.
    #[serde(default)]
    pub pickup: PickupConfig,
    /// Coin and earning policy.
    #[serde(default)]
    pub rewards: RewardsConfig,
    /// Background job runner.
    pub worker: WorkerConfig,
    /// Log level and output format.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the named environment.
    ///
    /// Sources are merged in order, later ones winning: `config/default.toml`,
    /// `config/{env}.toml`, then environment variables of the form
    /// `BEYONDTRIPS__SECTION__KEY` (for example `BEYONDTRIPS__DATABASE__URL`).
    /// Both files are optional so a fully env-driven deployment works.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BEYONDTRIPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to read configuration: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))
    }
}
