//! BTL coin award entity model.

use beyondtrips_core::types::{AwardId, DriverId, EarningId, MagazineId, RatingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::AwardStatus;

/// A BTL coin granted to a driver for one rider review.
///
/// `rating_id` carries a unique constraint, so at most one award can
/// ever exist per review regardless of how many dispatch attempts race.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BtlCoinAward {
    /// Unique award identifier.
    pub id: AwardId,
    /// The driver receiving the coin.
    pub driver_id: DriverId,
    /// The magazine edition that was scanned.
    pub magazine_id: MagazineId,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// The review that earned the coin (unique).
    pub rating_id: RatingId,
    /// Number of coins granted (always 1).
    pub amount: i32,
    /// Processing status.
    pub status: AwardStatus,
    /// The ledger entry this award funded.
    pub earning_id: Option<EarningId>,
    /// When the coin was awarded.
    pub created_at: DateTime<Utc>,
    /// When the award was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new award.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAward {
    /// The driver receiving the coin.
    pub driver_id: DriverId,
    /// The magazine edition.
    pub magazine_id: MagazineId,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// The review that earned the coin.
    pub rating_id: RatingId,
    /// Number of coins granted.
    pub amount: i32,
}
