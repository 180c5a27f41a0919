//! Driver entity model.

use beyondtrips_core::types::DriverId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::DriverStatus;

/// A registered driver in the Beyond Trips marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    /// Unique driver identifier.
    pub id: DriverId,
    /// Full legal name.
    pub full_name: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Account status.
    pub status: DriverStatus,
    /// When the driver was onboarded.
    pub created_at: DateTime<Utc>,
    /// When the driver record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Check if the driver may request a magazine pickup.
    pub fn can_request_pickup(&self) -> bool {
        self.status.can_request_pickup()
    }
}

/// Data required to onboard a new driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDriver {
    /// Full legal name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Phone number (optional).
    pub phone: Option<String>,
}
