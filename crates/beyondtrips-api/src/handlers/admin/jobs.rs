//! Background job observability handlers.
//!
//! Failed side-effect deliveries stay visible in the jobs table; these
//! endpoints let an operator inspect them and push a failed job back
//! into the queue.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use beyondtrips_core::error::AppError;
use beyondtrips_core::types::JobId;
use beyondtrips_core::types::pagination::PageRequest;
use beyondtrips_entity::job::model::Job;
use beyondtrips_entity::job::status::JobStatus;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthAdmin;
use crate::state::AppState;

/// Query parameters for the admin job listing.
#[derive(Debug, Deserialize)]
pub struct JobListParams {
    /// Status filter (e.g. `failed`).
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

/// GET /api/admin/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<JobListParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<JobStatus>)
        .transpose()?;

    let page = state
        .job_repo
        .find_all(status, &PageRequest::new(params.page, params.per_page))
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/admin/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Job>>> {
    let job = state
        .job_repo
        .find_by_id(JobId::from_uuid(id))
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;
    Ok(Json(ApiResponse::ok(job)))
}

/// POST /api/admin/jobs/{id}/retry
pub async fn retry_job(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let job_id = JobId::from_uuid(id);
    let job = state
        .job_repo
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;

    let requeued = state.job_repo.retry(job_id).await?;
    if !requeued {
        return Err(AppError::conflict(format!(
            "Only failed jobs can be retried; job is '{}'",
            job.status
        ))
        .into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Job requeued".to_string(),
    })))
}
