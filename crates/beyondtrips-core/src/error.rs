//! Application-wide error type.
//!
//! Every fallible path in the workspace funnels into [`AppError`] so the
//! API layer can translate failures into HTTP responses in one place.
//! Domain failures are constructed directly (`AppError::conflict`,
//! `AppError::not_found`, ...); driver-level errors from sqlx and serde
//! are wrapped with [`AppError::with_source`] so the original cause stays
//! on the chain for logging.

use std::fmt;
use thiserror::Error;

/// Machine-readable failure categories.
///
/// The API layer maps each kind onto an HTTP status; the wire code in
/// error response bodies is the form returned by [`ErrorKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The referenced row does not exist.
    NotFound,
    /// Missing or unverifiable bearer token.
    Authentication,
    /// Authenticated, but not allowed to perform the action.
    Authorization,
    /// The request payload failed validation.
    Validation,
    /// Duplicate submission or a disallowed state transition.
    Conflict,
    /// A cool-down window was hit.
    RateLimit,
    /// A bug or unexpected condition inside the service.
    Internal,
    /// PostgreSQL reported an error.
    Database,
    /// Configuration could not be loaded or is inconsistent.
    Configuration,
    /// JSON could not be encoded or decoded.
    Serialization,
    /// A dependency is down; the caller may retry.
    ServiceUnavailable,
}

impl ErrorKind {
    /// Wire code for this kind, as it appears in error response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authentication => "AUTHENTICATION",
            Self::Authorization => "AUTHORIZATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::RateLimit => "RATE_LIMIT",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one error type crossing crate boundaries.
///
/// `kind` drives the HTTP mapping, `message` is safe to show callers for
/// client-errors, and `source` carries the underlying driver error when
/// there is one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Failure category; drives the HTTP status.
    pub kind: ErrorKind,
    /// Text shown to the caller for client errors.
    pub message: String,
    /// Driver-level cause, kept for the log chain.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// An error with no underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a driver-level error with a category and message.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Duplicate review submissions and pickup transitions whose current
    /// status does not allow the requested edge land here.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Repeat scans inside the cool-down window land here.
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

// The boxed source is not cloneable; clones keep the kind and message,
// which is all the HTTP layer needs.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}
