//! Route definitions for the Beyond Trips HTTP API.
//!
//! All routes are organized by surface and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Every request body is a small JSON document.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(driver_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Anonymous rider endpoints.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/public/rider/scan-magazine",
            post(handlers::rider::scan_magazine),
        )
        .route(
            "/public/rider/submit-review",
            post(handlers::rider::submit_review),
        )
}

/// Authenticated driver endpoints.
fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/driver/profile", get(handlers::driver::profile))
        .route("/driver/pickups", post(handlers::pickup::request_pickup))
        .route("/driver/pickups", get(handlers::pickup::list_pickups))
        .route("/driver/pickups/{id}", get(handlers::pickup::get_pickup))
        .route(
            "/driver/pickups/{id}/confirm",
            put(handlers::pickup::confirm_pickup),
        )
        .route(
            "/driver/pickups/{id}/activate",
            put(handlers::pickup::activate_pickup),
        )
        .route(
            "/driver/pickups/{id}/return",
            put(handlers::pickup::return_pickup),
        )
        .route("/driver/btl-coins", get(handlers::driver::btl_coins))
        .route("/driver/earnings", get(handlers::driver::earnings))
        .route(
            "/driver/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/driver/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/driver/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/driver/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Driver management
        .route("/admin/drivers", post(handlers::admin::drivers::onboard_driver))
        .route("/admin/drivers", get(handlers::admin::drivers::list_drivers))
        // Magazine management
        .route(
            "/admin/magazines",
            post(handlers::admin::magazines::create_magazine),
        )
        .route(
            "/admin/magazines",
            get(handlers::admin::magazines::list_magazines),
        )
        .route(
            "/admin/magazines/{id}/publish",
            put(handlers::admin::magazines::publish_magazine),
        )
        // Pickup review
        .route("/admin/pickups", get(handlers::admin::pickups::list_pickups))
        .route(
            "/admin/pickups/{id}/approve",
            put(handlers::admin::pickups::approve_pickup),
        )
        .route(
            "/admin/pickups/{id}/reject",
            put(handlers::admin::pickups::reject_pickup),
        )
        .route(
            "/admin/pickups/{id}/return",
            put(handlers::admin::pickups::return_pickup),
        )
        .route(
            "/admin/pickups/{id}/lost",
            put(handlers::admin::pickups::mark_lost),
        )
        .route(
            "/admin/pickups/{id}/damaged",
            put(handlers::admin::pickups::mark_damaged),
        )
        // Job observability
        .route("/admin/jobs", get(handlers::admin::jobs::list_jobs))
        .route("/admin/jobs/{id}", get(handlers::admin::jobs::get_job))
        .route(
            "/admin/jobs/{id}/retry",
            post(handlers::admin::jobs::retry_job),
        )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
