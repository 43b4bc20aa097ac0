//! API Routes
//!
//! - `GET /` - API banner
//! - `GET /health` - Health check, reports live or demo mode
//! - `POST /research` - Run the research pipeline for a query

pub mod health;
pub mod research;

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(research::router(state.clone()))
        .merge(health::router(state))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &origins)
}
