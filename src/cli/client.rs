//! HTTP client for the research API, shared by the interactive CLI and the smoke runner.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{HealthResponse, ReportResult, ResearchRequest};

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
pub const RESEARCH_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Network(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    research_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            research_timeout: RESEARCH_TIMEOUT,
        }
    }

    pub fn with_research_timeout(mut self, timeout: Duration) -> Self {
        self.research_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        Self::decode(response).await
    }

    pub async fn research(&self, query: &str) -> Result<ReportResult, ClientError> {
        debug!(query = %query, "Posting research request");

        let response = self
            .client
            .post(format!("{}/research", self.base_url))
            .json(&ResearchRequest {
                query: query.to_string(),
            })
            .timeout(self.research_timeout)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
