//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`             - Forward to the dashboard (or 204 without one)
//! - `GET  /{code}`       - Short link redirect
//! - `GET  /code/{code}`  - Forward to the dashboard's page for a code
//! - `GET  /healthz`      - Health check
//! - `/api/*`             - JSON link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive cross-origin policy
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{code_page_handler, health_handler, index_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routed application without path normalization.
///
/// Used directly by tests; the server wraps it with [`app_router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(health_handler))
        .route("/code/{code}", get(code_page_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing so `/api/links/` and
/// `/api/links` reach the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
