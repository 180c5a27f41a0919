//! Admin pickup review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use beyondtrips_core::error::AppError;
use beyondtrips_core::types::PickupId;
use beyondtrips_core::types::pagination::PageRequest;
use beyondtrips_entity::pickup::model::MagazinePickup;
use beyondtrips_entity::pickup::status::PickupStatus;

use crate::dto::request::RejectPickupRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// Query parameters for the admin pickup listing.
#[derive(Debug, Deserialize)]
pub struct PickupListParams {
    /// Status filter (e.g. `requested`).
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

/// GET /api/admin/pickups
pub async fn list_pickups(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<PickupListParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<PickupStatus>)
        .transpose()?;

    let page = state
        .pickup_service
        .list_all(status, PageRequest::new(params.page, params.per_page))
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// PUT /api/admin/pickups/{id}/approve
pub async fn approve_pickup(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .approve(&auth, PickupId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/admin/pickups/{id}/reject
pub async fn reject_pickup(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectPickupRequest>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pickup = state
        .pickup_service
        .reject(&auth, PickupId::from_uuid(id), &req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/admin/pickups/{id}/return
pub async fn return_pickup(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .return_pickup(&auth, PickupId::from_uuid(id), None)
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/admin/pickups/{id}/lost
pub async fn mark_lost(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .mark_lost(&auth, PickupId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}

/// PUT /api/admin/pickups/{id}/damaged
pub async fn mark_damaged(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MagazinePickup>>> {
    let pickup = state
        .pickup_service
        .mark_damaged(&auth, PickupId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(pickup)))
}
