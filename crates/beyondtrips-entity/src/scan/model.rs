//! QR scan event entity model.

use beyondtrips_core::types::{DriverId, MagazineId, ScanId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rider's scan of a magazine barcode.
///
/// Scan rows back the cool-down query; rows older than the window are
/// pruned by a maintenance job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MagazineScan {
    /// Unique scan identifier.
    pub id: ScanId,
    /// The driver holding the scanned copy.
    pub driver_id: DriverId,
    /// The magazine edition.
    pub magazine_id: MagazineId,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// Client device fingerprint (optional).
    pub device_fingerprint: Option<String>,
    /// When the scan happened.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new scan event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScan {
    /// The driver holding the scanned copy.
    pub driver_id: DriverId,
    /// The magazine edition.
    pub magazine_id: MagazineId,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// Client device fingerprint (optional).
    pub device_fingerprint: Option<String>,
}
