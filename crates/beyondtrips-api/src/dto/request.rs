//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Rider scan request body (public, no auth).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanMagazineRequest {
    /// Barcode printed on the magazine copy.
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    /// Client device fingerprint.
    pub device_fingerprint: Option<String>,
}

/// Rider review submission body (public, no auth).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    /// Barcode printed on the magazine copy.
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    /// Star rating, 1 to 5.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    /// Free-text review.
    pub review: Option<String>,
    /// Rider's name.
    #[validate(length(min = 1, max = 255, message = "Rater name is required"))]
    pub rater_name: String,
    /// Rider's email.
    #[validate(email(message = "Invalid email address"))]
    pub rater_email: Option<String>,
    /// Rider's phone.
    pub rater_phone: Option<String>,
    /// Client device fingerprint.
    pub device_fingerprint: Option<String>,
}

/// Driver pickup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestPickupRequest {
    /// Magazine edition to pick up.
    pub magazine_id: Uuid,
    /// Number of copies.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Pickup collection confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmPickupRequest {
    /// 6-digit code issued at approval.
    #[validate(length(min = 1, message = "Verification code is required"))]
    pub verification_code: String,
}

/// Pickup activation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivatePickupRequest {
    /// Barcode scanned from the physical copy.
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
}

/// Admin driver onboarding body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OnboardDriverRequest {
    /// Full legal name.
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    /// Email address (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
}

/// Admin magazine creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMagazineRequest {
    /// Magazine title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Edition label.
    #[validate(length(min = 1, max = 100, message = "Edition is required"))]
    pub edition: String,
    /// Barcode printed on copies.
    #[validate(length(min = 1, max = 100, message = "Barcode is required"))]
    pub barcode: String,
}

/// Admin pickup rejection body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectPickupRequest {
    /// Reason shown to the driver.
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
}
