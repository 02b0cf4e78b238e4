use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, torznab};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Service routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config));

    Router::new()
        // Torznab clients are configured with either base path
        .route("/torznab/api", get(torznab::torznab_api))
        .route("/api", get(torznab::torznab_api))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
