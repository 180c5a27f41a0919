//! BTL coin award dispatch.

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, RewardDispatcher};
