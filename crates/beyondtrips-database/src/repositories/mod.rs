//! Repository implementations for all Beyond Trips entities.

pub mod audit;
pub mod driver;
pub mod earning;
pub mod job;
pub mod magazine;
pub mod notification;
pub mod pickup;
pub mod rating;
pub mod reward;
pub mod scan;

pub use audit::AuditRepository;
pub use driver::DriverRepository;
pub use earning::EarningRepository;
pub use job::JobRepository;
pub use magazine::MagazineRepository;
pub use notification::NotificationRepository;
pub use pickup::PickupRepository;
pub use rating::RatingRepository;
pub use reward::AwardRepository;
pub use scan::ScanRepository;
