use axum::{extract::State, routing::get, Json, Router};

use crate::models::{AppState, HealthResponse, RootResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Research Assistant API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = if state.pipeline.is_demo() { "demo" } else { "live" };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: mode.to_string(),
    })
}
