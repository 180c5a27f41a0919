//! CORS layer built from configuration.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use beyondtrips_core::config::CorsConfig;

fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

/// Translate [`CorsConfig`] into a tower layer.
///
/// A literal `"*"` in the origin or header lists switches that axis to
/// wildcard mode; entries that fail to parse are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = |values: &[String]| values.iter().any(|v| v == "*");

    let mut layer = CorsLayer::new()
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age_seconds));

    layer = if wildcard(&config.allowed_origins) {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    if wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_all::<HeaderName>(&config.allowed_headers))
    }
}
