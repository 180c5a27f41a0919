//! Notification categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse grouping a driver can filter their inbox by.
///
/// Stored as plain text on the row; this enum exists so creation sites
/// cannot invent new spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Pickup lifecycle: approval, rejection, return, overdue.
    Pickup,
    /// Coins and earnings.
    Reward,
    /// Account and operational messages.
    System,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Reward => "reward",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
