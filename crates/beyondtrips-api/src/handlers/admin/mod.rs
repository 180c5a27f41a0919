//! Admin-only handlers.

pub mod drivers;
pub mod jobs;
pub mod magazines;
pub mod pickups;
