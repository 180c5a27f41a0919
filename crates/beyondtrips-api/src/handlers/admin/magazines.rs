//! Admin magazine management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use beyondtrips_core::error::AppError;
use beyondtrips_core::types::MagazineId;
use beyondtrips_entity::magazine::model::{CreateMagazine, Magazine};

use crate::dto::request::CreateMagazineRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthAdmin, PaginationParams};
use crate::state::AppState;

/// POST /api/admin/magazines
pub async fn create_magazine(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(req): Json<CreateMagazineRequest>,
) -> ApiResult<Json<ApiResponse<Magazine>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let magazine = state
        .magazine_service
        .create(
            &auth,
            CreateMagazine {
                title: req.title,
                edition: req.edition,
                barcode: req.barcode,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(magazine)))
}

/// PUT /api/admin/magazines/{id}/publish
pub async fn publish_magazine(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Magazine>>> {
    let magazine = state
        .magazine_service
        .publish(&auth, MagazineId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(magazine)))
}

/// GET /api/admin/magazines
pub async fn list_magazines(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .magazine_service
        .list(params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}
