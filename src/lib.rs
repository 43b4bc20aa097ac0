// Research Crew - sequential search / summarize / verify research assistant

pub mod agents;
pub mod cli;
pub mod config;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use agents::ResearchPipeline;
pub use config::Config;
pub use models::{AppState, ReportResult};
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
