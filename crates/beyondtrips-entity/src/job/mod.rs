//! Durable background jobs and their typed payloads.

pub mod model;
pub mod payload;
pub mod status;

pub use model::{CreateJob, Job};
pub use payload::JobPayload;
pub use status::{JobPriority, JobStatus};
