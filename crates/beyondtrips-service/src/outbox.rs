//! Helpers for turning typed payloads into queue rows.

use beyondtrips_core::result::AppResult;
use beyondtrips_entity::job::model::CreateJob;
use beyondtrips_entity::job::payload::{JobPayload, QUEUE_MAINTENANCE};
use beyondtrips_entity::job::status::JobPriority;

/// Build a queue row for a typed payload.
///
/// Maintenance payloads run at low priority so they never starve the
/// user-facing side-effect jobs.
pub fn create_job(payload: &JobPayload, max_attempts: i32) -> AppResult<CreateJob> {
    let priority = if payload.queue() == QUEUE_MAINTENANCE {
        JobPriority::Low
    } else {
        JobPriority::Normal
    };

    Ok(CreateJob {
        job_type: payload.job_type().to_string(),
        queue: payload.queue().to_string(),
        priority,
        payload: serde_json::to_value(payload)?,
        max_attempts,
        scheduled_at: None,
    })
}
