//! Driver earnings queries.

pub mod service;

pub use service::{EarningService, EarningStatement};
