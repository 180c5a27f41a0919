//! Magazine domain entities.

pub mod model;
pub mod status;

pub use model::{CreateMagazine, Magazine};
pub use status::MagazineStatus;
