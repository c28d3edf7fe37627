//! Chat-completion session implementation
//!
//! Each role prompt already carries the whole discussion, so a session holds
//! no history: every request is the optional system message plus one user
//! message.

use crate::openai::error::{OpenAiError, Result};
use crate::openai::gateway::OpenAiConfig;
use crate::openai::protocol::{ChatChunk, ChatMessage, ChatRequest, ChatResponse};
use crate::openai::sse::{SseDecoder, SseFrame};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use triad_application::ports::llm_gateway::{GatewayError, LlmSession, StreamHandle};
use triad_domain::{Model, StreamEvent};

const STREAM_BUFFER: usize = 64;

pub struct OpenAiSession {
    client: Client,
    config: Arc<OpenAiConfig>,
    model: Model,
    system: Option<ChatMessage>,
}

impl OpenAiSession {
    pub fn new(
        client: Client,
        config: Arc<OpenAiConfig>,
        model: Model,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            client,
            config,
            model,
            system: system_prompt
                .filter(|prompt| !prompt.is_empty())
                .map(ChatMessage::system),
        }
    }

    fn messages(&self, content: &str) -> Vec<ChatMessage> {
        self.system
            .iter()
            .cloned()
            .chain(std::iter::once(ChatMessage::user(content)))
            .collect()
    }

    async fn post(&self, messages: &[ChatMessage], stream: bool) -> Result<reqwest::Response> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages,
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stream,
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            stream,
            "Calling chat completions"
        );

        let mut builder = self
            .client
            .post(self.config.completions_url())
            .json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }
        Ok(response)
    }

    /// Sends a prompt and waits for the complete response.
    pub async fn ask(&self, content: &str) -> Result<String> {
        let response: ChatResponse = self
            .post(&self.messages(content), false)
            .await?
            .json()
            .await?;
        response.into_text().ok_or(OpenAiError::EmptyResponse)
    }
}

enum Decoded {
    Delta(String),
    Done,
    Skip,
}

fn decode(frame: SseFrame) -> Decoded {
    match frame {
        SseFrame::Done => Decoded::Done,
        SseFrame::Data(data) => match serde_json::from_str::<ChatChunk>(&data) {
            Ok(chunk) => chunk
                .text()
                .map(|text| Decoded::Delta(text.to_string()))
                .unwrap_or(Decoded::Skip),
            Err(e) => {
                warn!("Skipping malformed stream chunk: {}", e);
                Decoded::Skip
            }
        },
    }
}

/// Forward a streaming body as [`StreamEvent`]s.
///
/// Ends with `Completed(full_text)` on `[DONE]` or on a clean end of body
/// after at least one delta, `Error` otherwise. Returns the full text on
/// success.
async fn pump<S, B>(body: S, tx: mpsc::Sender<StreamEvent>) -> Option<String>
where
    S: futures::Stream<Item = std::result::Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = SseDecoder::new();
    let mut full_text = String::new();
    let mut done = false;

    'read: while let Some(item) = body.next().await {
        let bytes = match item {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return None;
            }
        };
        for frame in decoder.push(bytes.as_ref()) {
            match decode(frame) {
                Decoded::Delta(text) => {
                    full_text.push_str(&text);
                    let _ = tx.send(StreamEvent::Delta(text)).await;
                }
                Decoded::Done => {
                    done = true;
                    break 'read;
                }
                Decoded::Skip => {}
            }
        }
    }

    if !done && let Some(frame) = decoder.finish() {
        match decode(frame) {
            Decoded::Delta(text) => {
                full_text.push_str(&text);
                let _ = tx.send(StreamEvent::Delta(text)).await;
            }
            Decoded::Done => done = true,
            Decoded::Skip => {}
        }
    }

    if done || !full_text.is_empty() {
        let _ = tx.send(StreamEvent::Completed(full_text.clone())).await;
        Some(full_text)
    } else {
        let _ = tx
            .send(StreamEvent::Error(OpenAiError::StreamInterrupted.to_string()))
            .await;
        None
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.ask(content).await?)
    }

    async fn send_streaming(
        &self,
        content: &str,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let response = self.post(&self.messages(content), true).await?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(async move {
            if let Some(text) = pump(response.bytes_stream(), tx).await {
                debug!(chars = text.chars().count(), "Stream finished");
            }
        });

        Ok(StreamHandle::new(rx))
    }
}
