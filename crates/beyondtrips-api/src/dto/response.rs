//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyondtrips_entity::driver::model::Driver;
use beyondtrips_entity::magazine::model::Magazine;
use beyondtrips_service::{ReviewOutcome, ScanOutcome};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Whether the background worker is enabled.
    pub worker_enabled: bool,
}

/// Magazine summary shown to anonymous riders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagazineSummary {
    /// Magazine ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Edition label.
    pub edition: String,
    /// Barcode.
    pub barcode: String,
}

impl From<&Magazine> for MagazineSummary {
    fn from(magazine: &Magazine) -> Self {
        Self {
            id: magazine.id.into_uuid(),
            title: magazine.title.clone(),
            edition: magazine.edition.clone(),
            barcode: magazine.barcode.clone(),
        }
    }
}

/// Driver summary shown to anonymous riders.
///
/// Deliberately omits email and phone; riders only see who they are
/// rating, not how to reach them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverPublic {
    /// Driver ID.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
}

impl From<&Driver> for DriverPublic {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id.into_uuid(),
            full_name: driver.full_name.clone(),
        }
    }
}

/// Rider scan response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    /// The scanned magazine edition.
    pub magazine: MagazineSummary,
    /// The driver holding the copy.
    pub driver: DriverPublic,
    /// The pickup placing the copy with the driver.
    pub pickup_id: Uuid,
}

impl From<&ScanOutcome> for ScanResponse {
    fn from(outcome: &ScanOutcome) -> Self {
        Self {
            magazine: MagazineSummary::from(&outcome.magazine),
            driver: DriverPublic::from(&outcome.driver),
            pickup_id: outcome.pickup.id.into_uuid(),
        }
    }
}

/// Stored-review summary returned to the rider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Rating ID.
    pub id: Uuid,
    /// Stars given.
    pub rating: i32,
    /// Whether the submission earned the driver a BTL coin.
    pub btl_coin_awarded: bool,
}

/// Rider review submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Whether the review was stored.
    pub success: bool,
    /// The stored review.
    pub rating: RatingSummary,
}

impl From<&ReviewOutcome> for ReviewResponse {
    fn from(outcome: &ReviewOutcome) -> Self {
        Self {
            success: true,
            rating: RatingSummary {
                id: outcome.rating.id.into_uuid(),
                rating: outcome.rating.rating,
                btl_coin_awarded: outcome.coin_awarded,
            },
        }
    }
}
