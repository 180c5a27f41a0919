//! Driver earnings ledger domain entities.

pub mod model;

pub use model::{CreateEarning, DriverEarning, EarningTotals};
