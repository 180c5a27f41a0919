//! QR scan event domain entities.

pub mod model;

pub use model::{CreateScan, MagazineScan};
