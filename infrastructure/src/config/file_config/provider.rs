//! Provider configuration from TOML (`[provider]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use triad_domain::Model;

/// OpenAI-compatible chat-completion provider configuration.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "http://localhost:11434/v1"
/// model = "llama3.1"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the API, up to and including the version segment.
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Model shared by all three roles.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    pub temperature: f32,
    /// Per-dispatch timeout; unset means wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            timeout_seconds: None,
        }
    }
}

impl FileProviderConfig {
    /// The configured API key, or the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        if self.model.trim().is_empty() {
            let issue = ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "provider.model".to_string(),
                },
                "provider.model: model name cannot be empty",
            );
            return (Model::default(), vec![issue]);
        }
        (Model::new(self.model.trim()), Vec::new())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_model().1;
        if self.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "provider.timeout_seconds".to_string(),
                },
                "provider.timeout_seconds: cannot be 0",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "provider.temperature".to_string(),
                },
                format!(
                    "provider.temperature: {} is outside 0.0..=2.0 and may be rejected",
                    self.temperature
                ),
            ));
        }
        issues
    }
}
