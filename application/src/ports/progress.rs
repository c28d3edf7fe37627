//! Progress notification port
//!
//! Defines the interface for reporting progress while a workflow runs.

use triad_domain::{FinalSummary, Phase, Role, Task, Turn};

/// Callback for progress updates during a workflow
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait WorkflowProgress: Send + Sync {
    /// Called right before a role is prompted
    fn on_dispatch(&self, role: Role, task: Task);

    /// Called with the complete response of a role
    fn on_response(&self, role: Role, text: &str);

    /// Called when the phase changes
    fn on_transition(&self, from: Phase, to: Phase);

    /// Called once when the workflow finishes
    fn on_finished(&self, summary: &FinalSummary);

    // ==================== Optional Callbacks ====================

    /// Called for each text chunk while a role is streaming.
    fn on_chunk(&self, _role: Role, _chunk: &str) {}

    /// Called for every turn appended to the transcript.
    fn on_turn(&self, _turn: &Turn) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl WorkflowProgress for NoProgress {
    fn on_dispatch(&self, _role: Role, _task: Task) {}
    fn on_response(&self, _role: Role, _text: &str) {}
    fn on_transition(&self, _from: Phase, _to: Phase) {}
    fn on_finished(&self, _summary: &FinalSummary) {}
}
