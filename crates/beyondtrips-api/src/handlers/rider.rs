//! Public rider handlers (no authentication).

use axum::Json;
use axum::extract::State;
use validator::Validate;

use beyondtrips_core::error::AppError;
use beyondtrips_service::SubmitReview;

use crate::dto::request::{ScanMagazineRequest, SubmitReviewRequest};
use crate::dto::response::{ApiResponse, ReviewResponse, ScanResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/public/rider/scan-magazine
pub async fn scan_magazine(
    State(state): State<AppState>,
    Json(req): Json<ScanMagazineRequest>,
) -> ApiResult<Json<ApiResponse<ScanResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .review_service
        .scan_magazine(&req.barcode, req.device_fingerprint.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(ScanResponse::from(&outcome))))
}

/// POST /api/public/rider/submit-review
pub async fn submit_review(
    State(state): State<AppState>,
    Json(req): Json<SubmitReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .review_service
        .submit_review(SubmitReview {
            magazine_barcode: req.barcode,
            rater_name: req.rater_name,
            rater_email: req.rater_email,
            rater_phone: req.rater_phone,
            rating: req.rating,
            review: req.review,
            device_fingerprint: req.device_fingerprint,
        })
        .await?;

    Ok(Json(ReviewResponse::from(&outcome)))
}
