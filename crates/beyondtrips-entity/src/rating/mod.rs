//! Rider review domain entities.

pub mod key;
pub mod model;

pub use key::SubmissionKey;
pub use model::{CreateRating, DriverRating};
