//! Bearer-token extractors for the driver and admin surfaces.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beyondtrips_core::config::AuthConfig;
use beyondtrips_core::error::AppError;
use beyondtrips_service::{AccessRole, RequestContext};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by a Beyond Trips bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject ID (driver or admin).
    pub sub: Uuid,
    /// Role granted when the token was issued.
    pub role: AccessRole,
    /// Display name.
    pub name: String,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
    /// Expiration timestamp (seconds).
    pub exp: i64,
}

/// Decodes and validates a bearer token against the configured secret.
fn decode_token(config: &AuthConfig, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = config.jwt_leeway_seconds;

    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::authentication("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::authentication("Invalid token format")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::authentication("Invalid token signature")
        }
        _ => AppError::authentication(format!("Token validation failed: {e}")),
    })?;

    Ok(token_data.claims)
}

/// Pulls the bearer token from the Authorization header and builds a context.
fn authenticate(parts: &Parts, state: &AppState) -> Result<RequestContext, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let claims = decode_token(&state.config.auth, token)?;

    Ok(RequestContext::new(claims.sub, claims.role, claims.name))
}

/// Authenticated caller context for driver endpoints.
///
/// Accepts both driver and admin tokens; ownership checks happen in the
/// service layer against the driver ID in the path or context.
#[derive(Debug, Clone)]
pub struct AuthDriver(pub RequestContext);

impl std::ops::Deref for AuthDriver {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthDriver {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state)?;
        Ok(AuthDriver(ctx))
    }
}

/// Authenticated caller context restricted to admin tokens.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub RequestContext);

impl std::ops::Deref for AuthAdmin {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = authenticate(parts, state)?;
        if !ctx.is_admin() {
            return Err(AppError::authorization("Admin access required").into());
        }
        Ok(AuthAdmin(ctx))
    }
}
