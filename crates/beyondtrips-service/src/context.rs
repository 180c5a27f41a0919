//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// A driver acting on their own resources.
    Driver,
    /// An admin operator.
    Admin,
}

/// Context for the current authenticated request.
///
/// Built by the auth extractor from the verified token and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated subject's ID (driver or admin).
    pub subject_id: Uuid,
    /// The subject's role at the time the token was issued.
    pub role: AccessRole,
    /// Display name from the token claims.
    pub display_name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(subject_id: Uuid, role: AccessRole, display_name: String) -> Self {
        Self {
            subject_id,
            role,
            display_name,
            request_time: Utc::now(),
        }
    }

    /// Check whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, AccessRole::Admin)
    }

    /// Actor label for audit entries (`"admin:<id>"` or `"driver:<id>"`).
    pub fn actor_label(&self) -> String {
        match self.role {
            AccessRole::Admin => format!("admin:{}", self.subject_id),
            AccessRole::Driver => format!("driver:{}", self.subject_id),
        }
    }
}
