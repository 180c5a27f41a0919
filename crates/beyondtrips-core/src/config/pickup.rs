//! Magazine pickup configuration.

use serde::{Deserialize, Serialize};

/// Pickup lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupConfig {
    /// Number of days a driver may hold a magazine before it is due back.
    #[serde(default = "default_return_window")]
    pub return_window_days: i64,
    /// Interval in hours between overdue-pickup sweeps.
    #[serde(default = "default_overdue_sweep")]
    pub overdue_sweep_interval_hours: u64,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            return_window_days: default_return_window(),
            overdue_sweep_interval_hours: default_overdue_sweep(),
        }
    }
}

fn default_return_window() -> i64 {
    30
}

fn default_overdue_sweep() -> u64 {
    6
}
