//! Magazine pickup entity model.

use beyondtrips_core::types::{DriverId, MagazineId, PickupId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::PickupStatus;

/// A driver's custody of physical magazine copies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MagazinePickup {
    /// Unique pickup identifier.
    pub id: PickupId,
    /// The driver holding the copies.
    pub driver_id: DriverId,
    /// The magazine edition being picked up.
    pub magazine_id: MagazineId,
    /// Number of copies.
    pub quantity: i32,
    /// Current lifecycle status.
    pub status: PickupStatus,
    /// QR token issued at approval, shown at the collection point.
    pub qr_code: Option<String>,
    /// 6-digit code issued at approval, required to confirm collection.
    pub verification_code: Option<String>,
    /// Barcode the driver scanned at activation.
    pub activation_barcode: Option<String>,
    /// Number of rider scans credited to this pickup.
    pub rider_scans: i32,
    /// Number of BTL coins earned through this pickup.
    pub btl_coins_earned: i32,
    /// Reason given when the request was rejected.
    pub rejection_reason: Option<String>,
    /// When the request was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the driver confirmed collection.
    pub picked_up_at: Option<DateTime<Utc>>,
    /// When the driver activated the barcode.
    pub activated_at: Option<DateTime<Utc>>,
    /// When the copies are due back.
    pub return_due_at: Option<DateTime<Utc>>,
    /// When the copies actually came back.
    pub actual_return_at: Option<DateTime<Utc>>,
    /// When the pickup was requested.
    pub created_at: DateTime<Utc>,
    /// When the pickup was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MagazinePickup {
    /// Check if the pickup is overdue at the given instant.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PickupStatus::Active
            && self.return_due_at.map(|due| due < now).unwrap_or(false)
    }

    /// Check if riders can scan the magazine held under this pickup.
    pub fn is_scannable(&self) -> bool {
        self.status.is_scannable()
    }
}

/// Data required to request a new pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePickup {
    /// The requesting driver.
    pub driver_id: DriverId,
    /// The magazine edition.
    pub magazine_id: MagazineId,
    /// Number of copies requested.
    pub quantity: i32,
}
