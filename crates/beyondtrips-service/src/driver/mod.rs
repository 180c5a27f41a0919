//! Driver account management.

pub mod service;

pub use service::DriverService;
