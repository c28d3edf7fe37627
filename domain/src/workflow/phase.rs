//! Workflow phases

use crate::core::role::Role;
use serde::{Deserialize, Serialize};

/// Phase of a workflow session
///
/// Exactly one phase is current at any time. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No request received yet
    #[default]
    Initial,
    /// Proposal made, waiting for the user to approve or request changes
    AwaitingUserConfirmation,
    /// Requirements role is writing the detailed specification
    Requirements,
    /// Builder discusses requirements and produces code
    Development,
    /// Verifier tests the current artifact
    Testing,
    /// Builder answers the verifier's feedback
    Review,
    /// Requirements role (and possibly the verifier) performs the final review
    Complete,
    /// Terminal: nothing is dispatched any more
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::AwaitingUserConfirmation => "user_confirmation",
            Phase::Requirements => "requirements",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Review => "review",
            Phase::Complete => "complete",
            Phase::Finished => "finished",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Initial => "Initial",
            Phase::AwaitingUserConfirmation => "Awaiting User Confirmation",
            Phase::Requirements => "Requirements",
            Phase::Development => "Development",
            Phase::Testing => "Testing",
            Phase::Review => "Review",
            Phase::Complete => "Final Review",
            Phase::Finished => "Finished",
        }
    }

    /// The role whose response this phase is waiting on, if any.
    ///
    /// Used to resume a stalled phase when the user speaks mid-workflow.
    pub fn expected_role(&self) -> Option<Role> {
        match self {
            Phase::Requirements | Phase::Complete => Some(Role::Requirements),
            Phase::Development | Phase::Review => Some(Role::Builder),
            Phase::Testing => Some(Role::Verifier),
            Phase::Initial | Phase::AwaitingUserConfirmation | Phase::Finished => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
