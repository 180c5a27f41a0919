//! Transactional BTL coin dispatch.
//!
//! One review earns the driver at most one coin. The award row, the
//! earnings ledger entry, the rating flag and the follow-up jobs are
//! written in a single transaction, so either all of them exist or none
//! do. The `UNIQUE (rating_id)` constraint on awards makes the dispatch
//! idempotent under retries and races.

use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use beyondtrips_core::error::{AppError, ErrorKind};
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::{AwardId, EarningId};
use beyondtrips_database::repositories::earning::EarningRepository;
use beyondtrips_database::repositories::job::JobRepository;
use beyondtrips_database::repositories::rating::RatingRepository;
use beyondtrips_database::repositories::reward::AwardRepository;
use beyondtrips_entity::earning::model::{
    CreateEarning, ENTRY_TYPE_BONUS, SOURCE_BTL_COIN, STATUS_COMPLETED,
};
use beyondtrips_entity::job::payload::JobPayload;
use beyondtrips_entity::notification::NotificationCategory;
use beyondtrips_entity::pickup::model::MagazinePickup;
use beyondtrips_entity::rating::model::DriverRating;
use beyondtrips_entity::reward::model::CreateAward;

use crate::outbox;

/// Result of a coin dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A coin was awarded and the ledger entry written.
    Awarded {
        /// The award row created for the rating.
        award_id: AwardId,
        /// The ledger entry the award credits.
        earning_id: EarningId,
    },
    /// The rating already had an award; nothing was written.
    AlreadyAwarded,
}

/// Writes the full award package for one review in one transaction.
#[derive(Debug, Clone)]
pub struct RewardDispatcher {
    pool: PgPool,
    awards: Arc<AwardRepository>,
    earnings: Arc<EarningRepository>,
    ratings: Arc<RatingRepository>,
    jobs: Arc<JobRepository>,
    coin_value_ngn: i64,
    job_max_attempts: i32,
}

impl RewardDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        pool: PgPool,
        awards: Arc<AwardRepository>,
        earnings: Arc<EarningRepository>,
        ratings: Arc<RatingRepository>,
        jobs: Arc<JobRepository>,
        coin_value_ngn: i64,
        job_max_attempts: i32,
    ) -> Self {
        Self {
            pool,
            awards,
            earnings,
            ratings,
            jobs,
            coin_value_ngn,
            job_max_attempts,
        }
    }

    /// Award the BTL coin earned by a stored review.
    ///
    /// Steps, all in one transaction: insert the award (idempotent on
    /// the rating), append the earnings ledger entry, link the two, flag
    /// the rating, and enqueue the counter bump, the driver notification
    /// and the audit job.
    pub async fn dispatch(
        &self,
        rating: &DriverRating,
        pickup: &MagazinePickup,
    ) -> AppResult<DispatchOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let award = match self
            .awards
            .insert_awarded_in_tx(
                &mut tx,
                &CreateAward {
                    driver_id: rating.driver_id,
                    magazine_id: rating.magazine_id,
                    magazine_barcode: rating.magazine_barcode.clone(),
                    rating_id: rating.id,
                    amount: 1,
                },
            )
            .await?
        {
            Some(award) => award,
            None => {
                tx.rollback().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
                })?;
                return Ok(DispatchOutcome::AlreadyAwarded);
            }
        };

        let amount_ngn = i64::from(award.amount) * self.coin_value_ngn;
        let earning = self
            .earnings
            .create_in_tx(
                &mut tx,
                &CreateEarning {
                    driver_id: rating.driver_id,
                    scans: 1,
                    points: award.amount,
                    amount_ngn,
                    entry_type: ENTRY_TYPE_BONUS.to_string(),
                    source: SOURCE_BTL_COIN.to_string(),
                    status: STATUS_COMPLETED.to_string(),
                },
            )
            .await?;

        self.awards
            .mark_processed_in_tx(&mut tx, award.id, earning.id)
            .await?;
        self.ratings
            .mark_coin_awarded_in_tx(&mut tx, rating.id)
            .await?;

        let followups = [
            JobPayload::RewardCounters {
                pickup_id: pickup.id,
            },
            JobPayload::DriverNotify {
                driver_id: rating.driver_id,
                category: NotificationCategory::Reward,
                title: "BTL Coin Earned!".to_string(),
                message: format!(
                    "A rider just reviewed your service. 1 BTL coin (NGN {}) was added to your earnings.",
                    self.coin_value_ngn
                ),
                priority: Some("high".to_string()),
            },
            JobPayload::AdminAudit {
                event_type: "btl_coin.awarded".to_string(),
                message: format!(
                    "BTL coin awarded to driver {} for rating {}",
                    rating.driver_id, rating.id
                ),
                actor: "system".to_string(),
                details: Some(json!({
                    "award_id": award.id,
                    "earning_id": earning.id,
                    "rating_id": rating.id,
                    "driver_id": rating.driver_id,
                    "pickup_id": pickup.id,
                    "amount_ngn": amount_ngn,
                })),
            },
        ];
        for payload in &followups {
            self.jobs
                .enqueue_in_tx(&mut tx, &outbox::create_job(payload, self.job_max_attempts)?)
                .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            award_id = %award.id,
            earning_id = %earning.id,
            rating_id = %rating.id,
            driver_id = %rating.driver_id,
            amount_ngn,
            "BTL coin awarded"
        );
        Ok(DispatchOutcome::Awarded {
            award_id: award.id,
            earning_id: earning.id,
        })
    }
}
