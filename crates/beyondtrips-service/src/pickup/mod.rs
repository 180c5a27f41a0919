//! Pickup lifecycle services.

pub mod codes;
pub mod service;

pub use service::PickupService;
