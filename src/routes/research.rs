use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{error, info, warn};

use crate::models::{AppState, ResearchRequest};
use crate::types::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/research", post(conduct_research))
        .with_state(state)
}

/// POST /research - run the pipeline for one query
async fn conduct_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> impl IntoResponse {
    info!(query = %request.query, "Received research request");

    match state.pipeline.run(&request.query).await {
        Ok(result) => {
            info!(
                query = %result.query,
                report_len = result.report.len(),
                "Research request completed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e @ AppError::InvalidInput(_)) => {
            warn!(error = %e, "Rejected research request");
            e.into_response()
        }
        Err(e) => {
            error!(error = %e, "Research failed");
            e.into_response()
        }
    }
}
