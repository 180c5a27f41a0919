//! Pickup lifecycle status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a magazine pickup.
///
/// Every legal transition is declared in [`PickupStatus::can_transition_to`];
/// anything else is rejected as a conflict. QR and verification codes are
/// generated at the `requested -> approved` edge, and since `approved` is
/// reachable only from `requested` they can never be regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pickup_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    /// Driver has requested the pickup; awaiting admin review.
    Requested,
    /// Admin approved; codes issued, awaiting physical collection.
    Approved,
    /// Admin rejected the request.
    Rejected,
    /// Driver confirmed physical collection with the verification code.
    PickedUp,
    /// Driver activated the magazine barcode; riders can scan it.
    Active,
    /// Magazine returned within the window.
    Returned,
    /// Magazine reported lost.
    Lost,
    /// Magazine reported damaged.
    Damaged,
}

impl PickupStatus {
    /// Check whether a transition from `self` to `next` is a declared edge.
    pub fn can_transition_to(&self, next: PickupStatus) -> bool {
        use PickupStatus::*;
        matches!(
            (self, next),
            (Requested, Approved)
                | (Requested, Rejected)
                | (Approved, PickedUp)
                | (Approved, Rejected)
                | (PickedUp, Active)
                | (Active, Returned)
                | (Active, Lost)
                | (Active, Damaged)
        )
    }

    /// Check if the status is terminal (no outgoing edges).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Returned | Self::Lost | Self::Damaged)
    }

    /// Check if riders can scan the magazine held under this pickup.
    pub fn is_scannable(&self) -> bool {
        matches!(self, Self::PickedUp | Self::Active)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::PickedUp => "picked_up",
            Self::Active => "active",
            Self::Returned => "returned",
            Self::Lost => "lost",
            Self::Damaged => "damaged",
        }
    }
}

impl fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PickupStatus {
    type Err = beyondtrips_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(Self::Requested),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "picked_up" => Ok(Self::PickedUp),
            "active" => Ok(Self::Active),
            "returned" => Ok(Self::Returned),
            "lost" => Ok(Self::Lost),
            "damaged" => Ok(Self::Damaged),
            _ => Err(beyondtrips_core::AppError::validation(format!(
                "Invalid pickup status: '{s}'"
            ))),
        }
    }
}
