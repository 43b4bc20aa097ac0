use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Placeholder credential shipped in sample `.env` files; treated as "no key".
pub const DEMO_API_KEY: &str = "demo_key";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub gemini_api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
}

impl LLMConfig {
    /// The configured credential, if it is a real one.
    pub fn active_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != DEMO_API_KEY)
            .map(String::from)
    }

    pub fn is_demo(&self) -> bool {
        self.active_api_key().is_none()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: or("PORT", "8000").parse()?,
                host: or("HOST", "0.0.0.0"),
                cors_allowed_origins: or("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                request_timeout_secs: or("REQUEST_TIMEOUT_SECS", "120").parse()?,
            },
            llm: LLMConfig {
                gemini_api_key: var("GEMINI_API_KEY"),
                api_base: or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                model: or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                max_tokens: or("LLM_MAX_TOKENS", "2048").parse()?,
                temperature: or("LLM_TEMPERATURE", "0.7").parse()?,
            },
            client: ClientConfig {
                base_url: or("RESEARCH_API_URL", "http://localhost:8000")
                    .trim_end_matches('/')
                    .to_string(),
            },
        })
    }
}
