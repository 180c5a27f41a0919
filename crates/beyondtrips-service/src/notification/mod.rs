//! Driver notification access.

pub mod service;

pub use service::NotificationService;
