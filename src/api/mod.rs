//! API layer for the Gemini gateway.
//!
//! This module contains the HTTP handlers and the router that binds them.

pub mod analysis;
pub mod gateway;
pub mod health;
pub mod state;

use crate::core::{request_id_middleware, MetricsMiddleware};
use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Re-export commonly used types
pub use analysis::{analyze_coins, AnalysisRequest};
pub use gateway::proxy_gemini;
pub use health::{health, metrics_handler};
pub use state::AppState;

/// Generic gateway route. Accepts every method so non-POST gets the
/// gateway's own plain-text 405.
pub const GEMINI_ROUTE: &str = "/api/gemini";

/// Structured analysis route, bound to POST only.
pub const ANALYZE_ROUTE: &str = "/api/analyze";

/// Build the router with all endpoints and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let gateway_routes = Router::new()
        .route(GEMINI_ROUTE, any(proxy_gemini))
        .route(ANALYZE_ROUTE, post(analyze_coins))
        .layer(axum::middleware::from_fn(MetricsMiddleware::track_metrics))
        .with_state(state);

    Router::new()
        .merge(gateway_routes)
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
