//! Driver notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use beyondtrips_core::types::{DriverId, NotificationId};

use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthDriver, PaginationParams};
use crate::state::AppState;

/// GET /api/driver/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthDriver,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let page = state
        .notification_service
        .list(DriverId::from_uuid(auth.subject_id), params.into_page_request())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/driver/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthDriver,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    let count = state
        .notification_service
        .unread_count(DriverId::from_uuid(auth.subject_id))
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/driver/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthDriver,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .notification_service
        .mark_read(
            DriverId::from_uuid(auth.subject_id),
            NotificationId::from_uuid(id),
        )
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// PUT /api/driver/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthDriver,
) -> ApiResult<Json<serde_json::Value>> {
    let count = state
        .notification_service
        .mark_all_read(DriverId::from_uuid(auth.subject_id))
        .await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "marked": count } }),
    ))
}
