//! # beyondtrips-service
//!
//! Business logic. Each sub-module owns one slice of the domain and
//! orchestrates the repositories beneath it; multi-write flows run
//! inside a single database transaction, with side-effect jobs recorded
//! in the same transaction as a transactional outbox.
//!
//! Dependencies are injected at construction via `Arc` references, so
//! the API and worker crates share service instances.

pub mod context;
pub mod driver;
pub mod earning;
pub mod magazine;
pub mod notification;
pub mod outbox;
pub mod pickup;
pub mod review;
pub mod reward;

pub use context::{AccessRole, RequestContext};
pub use driver::DriverService;
pub use earning::{EarningService, EarningStatement};
pub use magazine::MagazineService;
pub use notification::NotificationService;
pub use pickup::PickupService;
pub use review::{ReviewOutcome, ReviewService, ScanOutcome, SubmitReview};
pub use reward::{DispatchOutcome, RewardDispatcher};
