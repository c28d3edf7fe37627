//! Streaming events
//!
//! [`StreamEvent`] represents individual events in a streaming completion,
//! enabling real-time display of a role's output as it's generated.

/// An event in a streaming completion.
///
/// Bridges transport-level streaming (SSE chunks) to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}
