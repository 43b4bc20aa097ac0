use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::agents::ResearchPipeline;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: Arc<ResearchPipeline>,
}

/// The outcome of one research run.
///
/// Serialized as-is on the wire: `timestamp` becomes an RFC 3339 string and
/// `sources` keeps its order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportResult {
    pub query: String,
    pub report: String,
    pub timestamp: DateTime<Utc>,
    pub sources: Vec<String>,
}

impl ReportResult {
    /// Stamp a finished report with the current instant.
    pub fn new(query: impl Into<String>, report: impl Into<String>, sources: &[&str]) -> Self {
        Self {
            query: query.into(),
            report: report.into(),
            timestamp: Utc::now(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub mode: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}
