//! Driver pickup lifecycle handlers.
//!
//! The acting driver is always the token subject; a driver can never
//! touch another driver's pickup through these routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use beyondtrips_core::error::AppError;
use beyondtrips_core::types::{DriverId, MagazineId, PickupId};
use beyondtrips_entity::pickup::model::MagazinePickup;

use crate::dto::request::{ActivatePickupRequest, ConfirmPickupRequest, RequestPickupRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthDriver, PaginationParams};
use crate::state::AppState;

/// POST /api/driver/pickups
pub async fn request_pickup(
    State(state): State<AppState>,
    auth: AuthDriver,
    Json(req): Json<RequestPickupRequest>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pickup = state
        .pickup_service
        .request_pickup(
            &auth,
            DriverId::from_uuid(auth.subject_id),
            MagazineId::from_uuid(req.magazine_id),
            req.quantity,
        )
        .await?;

    Ok(Json(ApiResponse::ok(pickup)))
}

/// GET /api/driver/pickups
pub async fn list_pickups(
    State(state): State<AppState>,
    auth: AuthDriver,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .pickup_service
        .list_for_driver(DriverId::from_uuid(auth.subject_id), params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/driver/pickups/{id}
pub async fn get_pickup(
    State(state): State<AppState>,
    auth: AuthDriver,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .get_owned(DriverId::from_uuid(auth.subject_id), PickupId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/driver/pickups/{id}/confirm
pub async fn confirm_pickup(
    State(state): State<AppState>,
    auth: AuthDriver,
    Path(id): Path<Uuid>,
    Json(req): Json<ConfirmPickupRequest>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pickup = state
        .pickup_service
        .confirm_pickup(
            &auth,
            DriverId::from_uuid(auth.subject_id),
            PickupId::from_uuid(id),
            &req.verification_code,
        )
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/driver/pickups/{id}/activate
pub async fn activate_pickup(
    State(state): State<AppState>,
    auth: AuthDriver,
    Path(id): Path<Uuid>,
    Json(req): Json<ActivatePickupRequest>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pickup = state
        .pickup_service
        .activate(
            &auth,
            DriverId::from_uuid(auth.subject_id),
            PickupId::from_uuid(id),
            &req.barcode,
        )
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/driver/pickups/{id}/return
pub async fn return_pickup(
    State(state): State<AppState>,
    auth: AuthDriver,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .return_pickup(
            &auth,
            PickupId::from_uuid(id),
            Some(DriverId::from_uuid(auth.subject_id)),
        )
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}
