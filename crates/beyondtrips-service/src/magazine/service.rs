//! Magazine catalogue operations.

use std::sync::Arc;

use tracing::info;

use beyondtrips_core::error::AppError;
use beyondtrips_core::result::AppResult;
use beyondtrips_core::types::pagination::{PageRequest, PageResponse};
use beyondtrips_core::types::MagazineId;
use beyondtrips_database::repositories::magazine::MagazineRepository;
use beyondtrips_entity::magazine::model::{CreateMagazine, Magazine};

use crate::context::RequestContext;

/// Manages magazine editions.
#[derive(Debug, Clone)]
pub struct MagazineService {
    magazines: Arc<MagazineRepository>,
}

impl MagazineService {
    /// Create a new magazine service.
    pub fn new(magazines: Arc<MagazineRepository>) -> Self {
        Self { magazines }
    }

    /// Create a magazine edition in `draft` status (admin).
    pub async fn create(&self, ctx: &RequestContext, data: CreateMagazine) -> AppResult<Magazine> {
        if data.barcode.trim().is_empty() {
            return Err(AppError::validation("Barcode is required"));
        }

        let magazine = self.magazines.create(&data).await?;
        info!(
            magazine_id = %magazine.id,
            barcode = %magazine.barcode,
            actor = %ctx.actor_label(),
            "Magazine created"
        );
        Ok(magazine)
    }

    /// Fetch a magazine by ID.
    pub async fn get(&self, id: MagazineId) -> AppResult<Magazine> {
        self.magazines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Magazine not found"))
    }

    /// Publish a draft magazine (admin).
    pub async fn publish(&self, ctx: &RequestContext, id: MagazineId) -> AppResult<Magazine> {
        let magazine = self.get(id).await?;

        let published = self.magazines.publish(id).await?.ok_or_else(|| {
            AppError::conflict(format!(
                "Only draft magazines can be published; status is '{}'",
                magazine.status
            ))
        })?;

        info!(
            magazine_id = %published.id,
            barcode = %published.barcode,
            actor = %ctx.actor_label(),
            "Magazine published"
        );
        Ok(published)
    }

    /// List magazines (admin).
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Magazine>> {
        self.magazines.find_all(&page).await
    }
}
