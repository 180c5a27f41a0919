//! Magazine publication status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of a magazine edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "magazine_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MagazineStatus {
    /// Edition is being prepared and is not yet scannable.
    Draft,
    /// Edition is live; riders can scan its barcodes.
    Published,
    /// Edition is retired and no longer scannable.
    Archived,
}

impl MagazineStatus {
    /// Check if riders can scan copies of a magazine in this status.
    pub fn is_scannable(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for MagazineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MagazineStatus {
    type Err = beyondtrips_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(beyondtrips_core::AppError::validation(format!(
                "Invalid magazine status: '{s}'. Expected one of: draft, published, archived"
            ))),
        }
    }
}
