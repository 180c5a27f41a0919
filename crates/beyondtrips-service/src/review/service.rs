//! Rider scan and review submission flow.
//!
//! Both entry points are anonymous: the rider is identified only by the
//! scanned barcode and an optional device fingerprint. The barcode is
//! resolved to the driver currently holding the copy via the single
//! scannable pickup for that magazine.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use beyondtrips_core::config::rewards::RewardsConfig;
use beyondtrips_core::error::AppError;
use beyondtrips_core::result::AppResult;
use beyondtrips_database::repositories::driver::DriverRepository;
use beyondtrips_database::repositories::magazine::MagazineRepository;
use beyondtrips_database::repositories::pickup::PickupRepository;
use beyondtrips_database::repositories::rating::RatingRepository;
use beyondtrips_database::repositories::scan::ScanRepository;
use beyondtrips_entity::driver::model::Driver;
use beyondtrips_entity::magazine::model::Magazine;
use beyondtrips_entity::pickup::model::MagazinePickup;
use beyondtrips_entity::rating::key::SubmissionKey;
use beyondtrips_entity::rating::model::{CreateRating, DriverRating};
use beyondtrips_entity::scan::model::CreateScan;

use crate::reward::{DispatchOutcome, RewardDispatcher};

/// Resolved context for a scanned barcode.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// The scanned magazine edition.
    pub magazine: Magazine,
    /// The driver currently holding the copy.
    pub driver: Driver,
    /// The pickup that places the copy with the driver.
    pub pickup: MagazinePickup,
}

/// A rider's review submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReview {
    /// Barcode of the scanned copy.
    pub magazine_barcode: String,
    /// Rider's name.
    pub rater_name: String,
    /// Rider's email (optional).
    pub rater_email: Option<String>,
    /// Rider's phone (optional).
    pub rater_phone: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: i32,
    /// Free-text review (optional).
    pub review: Option<String>,
    /// Client device fingerprint (optional).
    pub device_fingerprint: Option<String>,
}

/// Result of a stored review submission.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    /// The persisted review.
    pub rating: DriverRating,
    /// Whether this submission earned the driver a BTL coin.
    pub coin_awarded: bool,
}

/// Handles rider scans and review submissions.
#[derive(Debug, Clone)]
pub struct ReviewService {
    magazines: Arc<MagazineRepository>,
    drivers: Arc<DriverRepository>,
    pickups: Arc<PickupRepository>,
    scans: Arc<ScanRepository>,
    ratings: Arc<RatingRepository>,
    dispatcher: Arc<RewardDispatcher>,
    config: RewardsConfig,
}

impl ReviewService {
    /// Create a new review service.
    pub fn new(
        magazines: Arc<MagazineRepository>,
        drivers: Arc<DriverRepository>,
        pickups: Arc<PickupRepository>,
        scans: Arc<ScanRepository>,
        ratings: Arc<RatingRepository>,
        dispatcher: Arc<RewardDispatcher>,
        config: RewardsConfig,
    ) -> Self {
        Self {
            magazines,
            drivers,
            pickups,
            scans,
            ratings,
            dispatcher,
            config,
        }
    }

    /// Resolve a scanned barcode to the magazine, holding driver and pickup.
    ///
    /// Applies the per-device cool-down and records the scan event.
    pub async fn scan_magazine(
        &self,
        barcode: &str,
        device_fingerprint: Option<&str>,
    ) -> AppResult<ScanOutcome> {
        let (magazine, driver, pickup) = self.resolve_scannable(barcode).await?;

        if let Some(fingerprint) = device_fingerprint.map(str::trim).filter(|f| !f.is_empty()) {
            let since = Utc::now() - Duration::seconds(self.config.scan_cooldown_seconds);
            if self
                .scans
                .exists_recent(driver.id, barcode, fingerprint, since)
                .await?
            {
                return Err(AppError::rate_limit(
                    "Please wait before scanning this magazine again",
                ));
            }
        }

        self.scans
            .create(&CreateScan {
                driver_id: driver.id,
                magazine_id: magazine.id,
                magazine_barcode: barcode.to_string(),
                device_fingerprint: device_fingerprint
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_owned),
            })
            .await?;

        info!(
            barcode = %barcode,
            driver_id = %driver.id,
            pickup_id = %pickup.id,
            "Magazine scanned"
        );
        Ok(ScanOutcome {
            magazine,
            driver,
            pickup,
        })
    }

    /// Store a rider review and attempt the BTL coin award.
    ///
    /// A failed award never loses the review: the dispatch runs after the
    /// review commits and its errors are logged, not surfaced.
    pub async fn submit_review(&self, data: SubmitReview) -> AppResult<ReviewOutcome> {
        if !(1..=5).contains(&data.rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }
        if data.rater_name.trim().is_empty() {
            return Err(AppError::validation("Rater name is required"));
        }

        let (magazine, driver, pickup) = self.resolve_scannable(&data.magazine_barcode).await?;

        let submission_key = SubmissionKey::derive(
            &data.magazine_barcode,
            data.device_fingerprint.as_deref(),
            data.rater_email.as_deref(),
            data.rater_phone.as_deref(),
            &data.rater_name,
        );

        let rating = self
            .ratings
            .create(&CreateRating {
                driver_id: driver.id,
                magazine_id: magazine.id,
                rater_name: data.rater_name.trim().to_string(),
                rater_email: data.rater_email,
                rater_phone: data.rater_phone,
                rating: data.rating,
                review: data.review,
                magazine_barcode: data.magazine_barcode,
                device_fingerprint: data.device_fingerprint,
                submission_key: submission_key.into_inner(),
            })
            .await?;

        let coin_awarded = match self.dispatcher.dispatch(&rating, &pickup).await {
            Ok(DispatchOutcome::Awarded { .. }) => true,
            Ok(DispatchOutcome::AlreadyAwarded) => false,
            Err(e) => {
                warn!(
                    rating_id = %rating.id,
                    driver_id = %driver.id,
                    error = %e,
                    "BTL coin dispatch failed; review was saved"
                );
                false
            }
        };

        info!(
            rating_id = %rating.id,
            driver_id = %driver.id,
            stars = rating.rating,
            coin_awarded,
            "Review submitted"
        );
        Ok(ReviewOutcome {
            rating,
            coin_awarded,
        })
    }

    /// Resolve a barcode to its magazine, the scannable pickup and the
    /// holding driver.
    async fn resolve_scannable(
        &self,
        barcode: &str,
    ) -> AppResult<(Magazine, Driver, MagazinePickup)> {
        let magazine = self
            .magazines
            .find_by_barcode(barcode)
            .await?
            .filter(|m| m.status.is_scannable())
            .ok_or_else(|| AppError::not_found("Magazine not found"))?;

        let pickup = self
            .pickups
            .find_scannable(magazine.id)
            .await?
            .ok_or_else(|| AppError::validation("Magazine not activated"))?;

        let driver = self
            .drivers
            .find_by_id(pickup.driver_id)
            .await?
            .ok_or_else(|| AppError::not_found("Driver not found"))?;

        Ok((magazine, driver, pickup))
    }
}
