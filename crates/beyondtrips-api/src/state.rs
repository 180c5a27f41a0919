//! Shared application state handed to every handler.

use std::sync::Arc;

use beyondtrips_core::config::AppConfig;
use beyondtrips_database::DatabasePool;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_service::{
    DriverService, EarningService, MagazineService, NotificationService, PickupService,
    ReviewService,
};

/// Application state shared across all routes.
///
/// Everything inside is either `Arc`-wrapped or cheaply cloneable, so the
/// state itself derives `Clone` for Axum.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabasePool,
    pub driver_service: Arc<DriverService>,
    pub magazine_service: Arc<MagazineService>,
    pub pickup_service: Arc<PickupService>,
    pub review_service: Arc<ReviewService>,
    pub earning_service: Arc<EarningService>,
    pub notification_service: Arc<NotificationService>,
    /// Direct repository access for the admin job endpoints.
    pub job_repo: Arc<JobRepository>,
}
