//! # beyondtrips-core
//!
//! Foundation crate: configuration, typed identifiers, pagination, and
//! the error type every other layer maps into HTTP responses or job
//! outcomes.
//!
//! Depends on no other workspace crate, so any crate may depend on it.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
