//! Audit event entity model.

use beyondtrips_core::types::AuditLogId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable audit trail entry recording a business event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditEvent {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The event that occurred (e.g., `"btl_coin.awarded"`, `"pickup.approved"`).
    pub event_type: String,
    /// Human-readable summary of the event.
    pub message: String,
    /// Who caused the event (`"system"`, `"admin:<id>"`, `"driver:<id>"`).
    pub actor: String,
    /// Structured event details (JSON).
    pub payload: Option<serde_json::Value>,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditEvent {
    /// The event that occurred.
    pub event_type: String,
    /// Human-readable summary.
    pub message: String,
    /// Who caused the event.
    pub actor: String,
    /// Structured event details.
    pub payload: Option<serde_json::Value>,
}
