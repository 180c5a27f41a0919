//! HTTP request handlers grouped by surface.

pub mod admin;
pub mod driver;
pub mod health;
pub mod notification;
pub mod pickup;
pub mod rider;
