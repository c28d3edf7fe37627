//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording workflow events
//! (turns, phase transitions, dispatches, finalization) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the negotiation
//! record in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured workflow event for logging.
pub struct ConversationEvent {
    /// Event type identifier (`turn`, `transition`, `dispatch`, `finalized`,
    /// `rejected_after_finish`).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging workflow events to a structured log.
///
/// `log` is synchronous and infallible: a failing logger must never
/// disturb the workflow, so implementations swallow their own errors.
pub trait ConversationLogger: Send + Sync {
    /// Record a workflow event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
