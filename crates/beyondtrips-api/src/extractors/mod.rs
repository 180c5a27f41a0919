//! Request extractors for authentication and pagination.

pub mod auth;
pub mod pagination;

pub use auth::{AuthAdmin, AuthDriver};
pub use pagination::PaginationParams;
