//! Result type alias used throughout the application.

use crate::error::AppError;

/// The standard result type for all Beyond Trips operations.
pub type AppResult<T> = Result<T, AppError>;
