//! The mutable core entity of a workflow session

use super::governor::{RoundGovernor, RoundLimits};
use super::phase::Phase;
use super::turn::{Transcript, Turn};
use serde::{Deserialize, Serialize};

/// Default number of recent turns per role inspected by the all-roles check
pub const DEFAULT_WINDOW_PER_ROLE: usize = 2;

/// Tunables of the workflow state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPolicy {
    pub limits: RoundLimits,
    /// Window for the all-roles-agreed check is this times the number of roles
    pub recent_window_per_role: usize,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            limits: RoundLimits::default(),
            recent_window_per_role: DEFAULT_WINDOW_PER_ROLE,
        }
    }
}

impl WorkflowPolicy {
    pub fn with_limits(mut self, limits: RoundLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_window_per_role(mut self, window: usize) -> Self {
        self.recent_window_per_role = window.max(1);
        self
    }
}

/// State of one workflow session (Entity)
///
/// Owned by exactly one session and only ever changed by
/// [`WorkflowMachine::step`](super::machine::WorkflowMachine::step), which
/// takes it by value and hands back the successor. Once `finished` is set the
/// state is inert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub(crate) phase: Phase,
    pub(crate) iteration_count: usize,
    pub(crate) governor: RoundGovernor,
    pub(crate) artifact: String,
    pub(crate) finished: bool,
    pub(crate) transcript: Transcript,
}

impl WorkflowState {
    pub fn new(limits: RoundLimits) -> Self {
        Self {
            phase: Phase::Initial,
            iteration_count: 1,
            governor: RoundGovernor::new(limits),
            artifact: String::new(),
            finished: false,
            transcript: Transcript::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Starts at 1, bumped every time Complete sends the work back to Development
    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    pub fn governor(&self) -> &RoundGovernor {
        &self.governor
    }

    /// Latest extracted code, empty until something was extracted
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn record(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new(RoundLimits::default())
    }
}
