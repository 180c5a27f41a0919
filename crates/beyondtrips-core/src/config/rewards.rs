//! Reward and coin configuration.

use serde::{Deserialize, Serialize};

/// Reward issuance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Naira value of a single BTL coin.
    #[serde(default = "default_coin_value")]
    pub coin_value_ngn: i64,
    /// Minimum seconds between two QR scans from the same device.
    #[serde(default = "default_scan_cooldown")]
    pub scan_cooldown_seconds: i64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            coin_value_ngn: default_coin_value(),
            scan_cooldown_seconds: default_scan_cooldown(),
        }
    }
}

fn default_coin_value() -> i64 {
    500
}

fn default_scan_cooldown() -> i64 {
    300
}
