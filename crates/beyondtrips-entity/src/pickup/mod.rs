//! Magazine pickup domain entities.

pub mod model;
pub mod status;

pub use model::{CreatePickup, MagazinePickup};
pub use status::PickupStatus;
