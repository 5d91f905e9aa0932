//! HTTP route handlers and router configuration

mod admin;
mod query;

pub use admin::{CheckHealthRequest, CheckHealthResult, HealthResponse, HealthStatus};
pub use query::{DataQuery, DataResponse, QueryDataRequest, QueryDataResponse, QueryModel};

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // Liveness
        .route("/health", get(admin::health))
        // Data source check
        .route("/check-health", post(admin::check_health))
        // Table queries
        .route("/query", post(query::query))
        .with_state(state.clone());

    // Add middleware
    router = router
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if state.config.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
