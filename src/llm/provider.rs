use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Anything that can turn an instruction plus context into text.
///
/// Workers only ever see this interface; the concrete backend (a hosted model,
/// or a scripted double in tests) is chosen when the pipeline is built.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str, context: &str) -> AppResult<String>;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LLMProviderConfig {
    /// Gemini settings from the application config; `None` in demo mode.
    pub fn from_llm_config(config: &LLMConfig) -> Option<Self> {
        let api_key = config.active_api_key()?;

        Some(Self {
            name: "google".to_string(),
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

pub struct LLM {
    adapter: Arc<dyn LLMAdapter>,
    provider_name: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let adapter: Arc<dyn LLMAdapter> = match provider.name.as_str() {
            "google" | "gemini" => Arc::new(crate::llm::google::GoogleAdapter::with_api_base(
                &provider.api_key,
                &provider.api_base,
            )),
            other => {
                return Err(AppError::Config(format!("Unsupported provider: {}", other)));
            }
        };

        Ok(Self {
            adapter,
            provider_name: provider.name,
            model: provider.model,
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
        })
    }

    /// Build an LLM around an existing adapter.
    pub fn with_adapter(adapter: Arc<dyn LLMAdapter>, provider: LLMProviderConfig) -> Self {
        Self {
            adapter,
            provider_name: provider.name,
            model: provider.model,
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
        }
    }

    pub fn from_config(config: &LLMConfig) -> AppResult<Option<Self>> {
        LLMProviderConfig::from_llm_config(config)
            .map(Self::new)
            .transpose()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }

    fn build_request(&self, instruction: &str, context: &str) -> LLMRequest {
        let user_content = if context.trim().is_empty() {
            "Begin the task.".to_string()
        } else {
            context.to_string()
        };

        LLMRequest {
            provider: self.provider_name.clone(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(user_content)],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            system_instruction: Some(instruction.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for LLM {
    async fn generate(&self, instruction: &str, context: &str) -> AppResult<String> {
        let request = self.build_request(instruction, context);
        let response = self.create_chat_completion(&request).await?;

        debug!(
            model = %self.model,
            finish_reason = %response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Generation complete"
        );

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DEFAULT_GEMINI_MODEL};
    use crate::types::TokenUsage;
    use std::sync::Mutex;

    struct RecordingAdapter {
        requests: Mutex<Vec<LLMRequest>>,
    }

    #[async_trait]
    impl LLMAdapter for RecordingAdapter {
        async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(LLMResponse {
                content: "generated".to_string(),
                finish_reason: "STOP".to_string(),
                usage: TokenUsage::default(),
            })
        }
    }

    fn provider(name: &str) -> LLMProviderConfig {
        LLMProviderConfig {
            name: name.to_string(),
            api_key: "key".to_string(),
            api_base: "http://localhost".to_string(),
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 512,
            temperature: 0.3,
        }
    }

    #[test]
    fn test_unsupported_provider() {
        let result = LLM::new(provider("carrier-pigeon"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_from_config_demo_mode() {
        let config = LLMConfig {
            gemini_api_key: Some("demo_key".to_string()),
            api_base: "http://localhost".to_string(),
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 512,
            temperature: 0.3,
        };
        assert!(LLM::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_maps_instruction_and_context() {
        let adapter = Arc::new(RecordingAdapter {
            requests: Mutex::new(Vec::new()),
        });
        let llm = LLM::with_adapter(adapter.clone(), provider("google"));

        let output = llm.generate("Be a searcher", "prior output").await.unwrap();
        assert_eq!(output, "generated");

        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system_instruction.as_deref(), Some("Be a searcher"));
        assert_eq!(requests[0].messages[0].content, "prior output");
        assert_eq!(requests[0].max_tokens, Some(512));
        assert_eq!(requests[0].model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_generate_with_empty_context_sends_placeholder() {
        let adapter = Arc::new(RecordingAdapter {
            requests: Mutex::new(Vec::new()),
        });
        let llm = LLM::with_adapter(adapter.clone(), provider("google"));

        llm.generate("instruction", "  ").await.unwrap();

        let requests = adapter.requests.lock().unwrap();
        assert_eq!(requests[0].messages[0].content, "Begin the task.");
    }

    #[tokio::test]
    async fn test_default_config_request_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "Be a searcher"}]},
                "contents": [{"role": "user", "parts": [{"text": "prior output"}]}],
                "generationConfig": {"maxOutputTokens": 2048}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "found it"}]}, "finishReason": "STOP"}]}"#)
            .create_async()
            .await;

        let config = Config::from_vars(|key| match key {
            "GEMINI_API_KEY" => Some("live-key".to_string()),
            "GEMINI_API_BASE" => Some(server.url()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);

        let llm = LLM::from_config(&config.llm).unwrap().unwrap();
        let output = llm.generate("Be a searcher", "prior output").await.unwrap();

        mock.assert_async().await;
        assert_eq!(output, "found it");
    }
}
