//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs one line per request with method, path, status, and duration.
///
/// Server errors log at `error` and client errors at `warn`; everything
/// else logs at `info`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, path, status, duration_ms, "HTTP request");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, path, status, duration_ms, "HTTP request");
    } else {
        tracing::info!(%method, path, status, duration_ms, "HTTP request");
    }

    response
}
