//! Driver domain entities.

pub mod model;
pub mod status;

pub use model::{CreateDriver, Driver};
pub use status::DriverStatus;
