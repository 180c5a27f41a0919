//! Shared types used across the workspace: entity ids and pagination.

pub mod id;
pub mod pagination;

pub use id::{
    AdminId, AuditLogId, AwardId, DriverId, EarningId, JobId, MagazineId, NotificationId,
    PickupId, RatingId, ScanId,
};
pub use pagination::{PageRequest, PageResponse};
