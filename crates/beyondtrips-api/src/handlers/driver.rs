//! Driver profile and earnings handlers.

use axum::Json;
use axum::extract::{Query, State};

use beyondtrips_core::types::DriverId;
use beyondtrips_entity::driver::model::Driver;
use beyondtrips_service::EarningStatement;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthDriver, PaginationParams};
use crate::state::AppState;

/// GET /api/driver/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthDriver,
) -> ApiResult<Json<ApiResponse<Driver>>> {
    let driver = state
        .driver_service
        .get(DriverId::from_uuid(auth.subject_id))
        .await?;
    Ok(Json(ApiResponse::ok(driver)))
}

/// GET /api/driver/earnings
pub async fn earnings(
    State(state): State<AppState>,
    auth: AuthDriver,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<EarningStatement>>> {
    let statement = state
        .earning_service
        .statement(DriverId::from_uuid(auth.subject_id), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(statement)))
}

/// GET /api/driver/btl-coins
pub async fn btl_coins(
    State(state): State<AppState>,
    auth: AuthDriver,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .earning_service
        .list_awards(DriverId::from_uuid(auth.subject_id), params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}
