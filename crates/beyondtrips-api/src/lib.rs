//! # beyondtrips-api
//!
//! Axum HTTP layer: the route table, handlers, auth extractors, DTOs,
//! middleware, and the mapping from error kinds to status codes.
//!
//! Public rider scan endpoints sit beside the authenticated driver and
//! admin surfaces; [`router`] holds the full table.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
