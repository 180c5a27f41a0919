//! Driver earnings statement assembly.

use std::sync::Arc;

use serde::Serialize;

use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::DriverId;
use beyondtrips_database::repositories::earning::EarningRepository;
use beyondtrips_database::repositories::reward::AwardRepository;
use beyondtrips_entity::earning::model::{DriverEarning, EarningTotals};
use beyondtrips_entity::reward::model::BtlCoinAward;

/// A page of ledger entries together with lifetime totals.
#[derive(Debug, Clone, Serialize)]
pub struct EarningStatement {
    /// The requested page of ledger entries.
    pub entries: PageResponse<DriverEarning>,
    /// Lifetime totals across the whole ledger.
    pub totals: EarningTotals,
}

/// Read-side service for driver earnings and awards.
#[derive(Debug, Clone)]
pub struct EarningService {
    earnings: Arc<EarningRepository>,
    awards: Arc<AwardRepository>,
}

impl EarningService {
    /// Create a new earning service.
    pub fn new(earnings: Arc<EarningRepository>, awards: Arc<AwardRepository>) -> Self {
        Self { earnings, awards }
    }

    /// Build a driver's earnings statement: one page of entries plus
    /// lifetime totals.
    pub async fn statement(
        &self,
        driver_id: DriverId,
        page: PageRequest,
    ) -> AppResult<EarningStatement> {
        let entries = self.earnings.find_by_driver(driver_id, &page).await?;
        let totals = self.earnings.totals_for_driver(driver_id).await?;
        Ok(EarningStatement { entries, totals })
    }

    /// List a driver's BTL coin awards.
    pub async fn list_awards(
        &self,
        driver_id: DriverId,
        page: PageRequest,
    ) -> AppResult<PageResponse<BtlCoinAward>> {
        self.awards.find_by_driver(driver_id, &page).await
    }
}
