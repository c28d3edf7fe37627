//! Phase-specific tasks handed to a role alongside the transcript

use serde::{Deserialize, Serialize};

/// What a role is being asked to do on its next turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Requirements role analyses the first request and proposes a design
    ProposeDesign,
    /// Requirements role revises the proposal after user feedback
    ReviseProposal,
    /// Requirements role writes the detailed product specification
    WriteSpecification,
    /// Builder opens the requirements discussion
    AskClarifyingQuestions,
    /// Builder continues the discussion or starts writing code
    ContinueDiscussion,
    /// Builder must now write code, the discussion budget is spent
    ForceCode,
    /// Verifier tests the current artifact
    TestCode,
    /// Builder answers the verifier's feedback
    AddressFeedback,
    /// Verifier reviews the builder's answer
    ContinueTesting,
    /// Requirements role reviews the final product
    FinalReview,
    /// Verifier confirms the requirements role's approval
    FinalConfirmation,
    /// Builder starts a new iteration with the requirements role's feedback
    NewIteration,
    /// A role answers a user message addressed to it mid-workflow
    DirectQuestion,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::ProposeDesign => "propose_design",
            Task::ReviseProposal => "revise_proposal",
            Task::WriteSpecification => "write_specification",
            Task::AskClarifyingQuestions => "ask_clarifying_questions",
            Task::ContinueDiscussion => "continue_discussion",
            Task::ForceCode => "force_code",
            Task::TestCode => "test_code",
            Task::AddressFeedback => "address_feedback",
            Task::ContinueTesting => "continue_testing",
            Task::FinalReview => "final_review",
            Task::FinalConfirmation => "final_confirmation",
            Task::NewIteration => "new_iteration",
            Task::DirectQuestion => "direct_question",
        }
    }

    /// Short progress label (e.g. for a spinner)
    pub fn label(&self) -> &'static str {
        match self {
            Task::ProposeDesign => "Proposing a design",
            Task::ReviseProposal => "Revising the proposal",
            Task::WriteSpecification => "Writing the specification",
            Task::AskClarifyingQuestions => "Asking clarifying questions",
            Task::ContinueDiscussion => "Discussing requirements",
            Task::ForceCode => "Writing code",
            Task::TestCode => "Testing the code",
            Task::AddressFeedback => "Addressing feedback",
            Task::ContinueTesting => "Reviewing changes",
            Task::FinalReview => "Final review",
            Task::FinalConfirmation => "Final confirmation",
            Task::NewIteration => "Starting a new iteration",
            Task::DirectQuestion => "Answering your question",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
