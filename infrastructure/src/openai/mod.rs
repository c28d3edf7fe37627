//! OpenAI-compatible chat-completion adapter
//!
//! Implements the `LlmGateway` / `LlmSession` ports over HTTP. Responses are
//! streamed as server-sent events and forwarded as `StreamEvent`s.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
pub mod sse;
