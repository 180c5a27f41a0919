//! BTL coin award status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of a BTL coin award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "award_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AwardStatus {
    /// Coin granted; ledger entry not yet linked.
    Awarded,
    /// Ledger entry created and linked.
    Processed,
    /// Award voided by an admin.
    Cancelled,
}

impl AwardStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Awarded => "awarded",
            Self::Processed => "processed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AwardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
