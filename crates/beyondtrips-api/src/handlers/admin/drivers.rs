//! Admin driver management handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use beyondtrips_core::error::AppError;
use beyondtrips_entity::driver::model::{CreateDriver, Driver};

use crate::dto::request::OnboardDriverRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// POST /api/admin/drivers
pub async fn onboard_driver(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(req): Json<OnboardDriverRequest>,
) -> ApiResult<Json<ApiResponse<Driver>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let driver = state
        .driver_service
        .onboard(
            &auth,
            CreateDriver {
                full_name: req.full_name,
                email: req.email,
                phone: req.phone,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(driver)))
}

/// GET /api/admin/drivers
pub async fn list_drivers(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .driver_service
        .list(params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}
