//! Magazine entity model.

use beyondtrips_core::types::MagazineId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::MagazineStatus;

/// A magazine edition distributed through the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Magazine {
    /// Unique magazine identifier.
    pub id: MagazineId,
    /// Magazine title.
    pub title: String,
    /// Edition label (e.g., `"2025-Q3"`).
    pub edition: String,
    /// Barcode printed on copies of this edition (unique).
    pub barcode: String,
    /// Publication status.
    pub status: MagazineStatus,
    /// When the edition was published.
    pub published_at: Option<DateTime<Utc>>,
    /// When the edition was created.
    pub created_at: DateTime<Utc>,
    /// When the edition was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Magazine {
    /// Check if riders can scan copies of this edition.
    pub fn is_scannable(&self) -> bool {
        self.status.is_scannable()
    }
}

/// Data required to create a new magazine edition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMagazine {
    /// Magazine title.
    pub title: String,
    /// Edition label.
    pub edition: String,
    /// Barcode printed on copies.
    pub barcode: String,
}
