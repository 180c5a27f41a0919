//! Built-in job handler implementations.

pub mod maintenance;
pub mod reward;

pub use maintenance::{JobPruneHandler, OverduePickupSweepHandler, ScanEventPruneHandler};
pub use reward::{AdminAuditHandler, DriverNotifyHandler, RewardCounterHandler};
