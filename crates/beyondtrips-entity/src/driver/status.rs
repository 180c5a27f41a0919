//! Driver account status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a driver account is in good standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "driver_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    /// In good standing; may request pickups.
    Active,
    /// Barred by an operator; existing pickups keep running but no new
    /// requests are accepted.
    Suspended,
}

impl DriverStatus {
    /// Only active drivers may open new pickup requests.
    pub fn can_request_pickup(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
