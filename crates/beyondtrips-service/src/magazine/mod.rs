//! Magazine catalogue management.

pub mod service;

pub use service::MagazineService;
