//! Rider review entity model.

use beyondtrips_core::types::{DriverId, MagazineId, RatingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rider's review of a driver, submitted after scanning a magazine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverRating {
    /// Unique rating identifier.
    pub id: RatingId,
    /// The driver being rated.
    pub driver_id: DriverId,
    /// The magazine edition that was scanned.
    pub magazine_id: MagazineId,
    /// Rider's name.
    pub rater_name: String,
    /// Rider's email (optional).
    pub rater_email: Option<String>,
    /// Rider's phone (optional).
    pub rater_phone: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: i32,
    /// Free-text review (optional).
    pub review: Option<String>,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// Client device fingerprint (optional).
    pub device_fingerprint: Option<String>,
    /// Composite duplicate-detection key (SHA-256 hex).
    pub submission_key: String,
    /// Whether a BTL coin has been awarded for this review.
    pub btl_coin_awarded: bool,
    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new rider review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRating {
    /// The driver being rated.
    pub driver_id: DriverId,
    /// The magazine edition.
    pub magazine_id: MagazineId,
    /// Rider's name.
    pub rater_name: String,
    /// Rider's email (optional).
    pub rater_email: Option<String>,
    /// Rider's phone (optional).
    pub rater_phone: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: i32,
    /// Free-text review (optional).
    pub review: Option<String>,
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// Client device fingerprint (optional).
    pub device_fingerprint: Option<String>,
    /// Composite duplicate-detection key.
    pub submission_key: String,
}
