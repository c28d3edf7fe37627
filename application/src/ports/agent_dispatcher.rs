//! Agent Dispatcher port
//!
//! The boundary between the workflow and the completion service. A dispatcher
//! takes a role and a fully rendered prompt and resolves to the role's
//! response text. It never fails: transport errors, timeouts and cancellation
//! all degrade to [`FALLBACK_RESPONSE`], so the state machine always has a
//! string to classify.
//!
//! [`GatewayDispatcher`] is the standard implementation on top of
//! [`LlmGateway`].

use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, WorkflowProgress};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use triad_domain::{Model, Role};

/// Text returned in place of a response when the completion call fails
pub const FALLBACK_RESPONSE: &str =
    "I apologize, but I encountered an error while processing your request. Please try again.";

/// Port for prompting a role
#[async_trait]
pub trait AgentDispatcher: Send + Sync {
    /// Prompt `role` and wait for its complete response.
    async fn send_role_prompt(&self, role: Role, prompt: &str) -> String;
}

/// Dispatcher backed by an [`LlmGateway`]
///
/// One session per dispatch with the role's instructions as system prompt;
/// the response is streamed and chunks are forwarded to the progress
/// notifier.
pub struct GatewayDispatcher {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    behavior: BehaviorConfig,
    progress: Arc<dyn WorkflowProgress>,
    cancellation_token: Option<CancellationToken>,
}

impl GatewayDispatcher {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self {
            gateway,
            model,
            behavior: BehaviorConfig::default(),
            progress: Arc::new(NoProgress),
            cancellation_token: None,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn WorkflowProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    async fn request(&self, role: Role, prompt: &str) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, role.instructions())
            .await?;
        let handle = session.send_streaming(prompt).await?;
        handle
            .collect_with(|chunk| self.progress.on_chunk(role, chunk))
            .await
    }

    async fn request_bounded(&self, role: Role, prompt: &str) -> Result<String, GatewayError> {
        let request = async {
            match self.behavior.timeout {
                Some(limit) => match tokio::time::timeout(limit, self.request(role, prompt)).await {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::Timeout),
                },
                None => self.request(role, prompt).await,
            }
        };

        if let Some(ref token) = self.cancellation_token {
            if token.is_cancelled() {
                return Err(GatewayError::Cancelled);
            }
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(GatewayError::Cancelled),
                result = request => result,
            }
        } else {
            request.await
        }
    }
}

#[async_trait]
impl AgentDispatcher for GatewayDispatcher {
    async fn send_role_prompt(&self, role: Role, prompt: &str) -> String {
        debug!(role = %role, model = %self.model, prompt_len = prompt.len(), "Dispatching prompt");
        match self.request_bounded(role, prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(role = %role, error = %e, "Completion failed, using fallback response");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }
}
