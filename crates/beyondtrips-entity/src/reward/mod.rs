//! BTL coin award domain entities.

pub mod model;
pub mod status;

pub use model::{BtlCoinAward, CreateAward};
pub use status::AwardStatus;
