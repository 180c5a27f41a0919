//! Driver earnings ledger entity model.

use beyondtrips_core::types::{DriverId, EarningId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ledger entry type for coin-funded bonuses.
pub const ENTRY_TYPE_BONUS: &str = "bonus";
/// Ledger source for BTL coin rewards.
pub const SOURCE_BTL_COIN: &str = "btl_coin";
/// Ledger status for settled entries.
pub const STATUS_COMPLETED: &str = "completed";

/// An append-only entry in a driver's earnings ledger.
///
/// `amount_ngn` is fixed when the row is written (points times the
/// configured coin value) and never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverEarning {
    /// Unique ledger entry identifier.
    pub id: EarningId,
    /// The driver credited.
    pub driver_id: DriverId,
    /// Number of rider scans credited by this entry.
    pub scans: i32,
    /// Number of coin points credited.
    pub points: i32,
    /// Naira amount credited.
    pub amount_ngn: i64,
    /// Entry type (e.g., `"bonus"`).
    pub entry_type: String,
    /// Funding source (e.g., `"btl_coin"`).
    pub source: String,
    /// Settlement status (e.g., `"completed"`).
    pub status: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEarning {
    /// The driver credited.
    pub driver_id: DriverId,
    /// Number of rider scans credited.
    pub scans: i32,
    /// Number of coin points credited.
    pub points: i32,
    /// Naira amount credited.
    pub amount_ngn: i64,
    /// Entry type.
    pub entry_type: String,
    /// Funding source.
    pub source: String,
    /// Settlement status.
    pub status: String,
}

/// Aggregated totals across a driver's ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EarningTotals {
    /// Total number of ledger entries.
    pub total_entries: i64,
    /// Sum of coin points.
    pub total_points: i64,
    /// Sum of Naira amounts.
    pub total_amount_ngn: i64,
}
