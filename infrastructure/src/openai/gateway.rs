//! OpenAI-compatible LLM Gateway implementation
//!
//! Works against any server exposing `POST /chat/completions` with
//! server-sent-event streaming (OpenAI, Azure OpenAI, Ollama, vLLM, ...).

use crate::config::FileProviderConfig;
use crate::openai::session::OpenAiSession;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};
use triad_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use triad_domain::Model;

/// Connection settings shared by every session
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OpenAiConfig {
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl From<&FileProviderConfig> for OpenAiConfig {
    fn from(file: &FileProviderConfig) -> Self {
        Self {
            base_url: file.base_url.clone(),
            api_key: file.resolve_api_key(),
            max_tokens: file.max_tokens,
            temperature: file.temperature,
        }
    }
}

/// LLM Gateway implementation for OpenAI-compatible endpoints
pub struct OpenAiGateway {
    client: Client,
    config: Arc<OpenAiConfig>,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!("triad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if config.api_key.is_none() {
            warn!(
                base_url = %config.base_url,
                "No API key configured; requests are sent without authorization"
            );
        }
        info!(base_url = %config.base_url, "OpenAiGateway initialized");

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn from_file_config(file: &FileProviderConfig) -> Result<Self, GatewayError> {
        Self::new(OpenAiConfig::from(file))
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.config),
            model.clone(),
            Some(system_prompt.to_string()),
        )))
    }
}
