//! Proposal review port
//!
//! After the requirements role proposes a design, the workflow waits for the
//! user. In one-shot runs the [`RunWorkflowUseCase`](crate::use_cases::run_workflow::RunWorkflowUseCase)
//! asks this port for the user's reply.
//!
//! - [`AutoApproveProposal`] - always answers with an approval phrase
//! - `StdinProposalReview` - presentation layer, reads the reply from stdin

use async_trait::async_trait;
use thiserror::Error;

/// Reply sent by [`AutoApproveProposal`]
pub const APPROVAL_REPLY: &str = "I agree with your proposal";

/// Failure while collecting the user's reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProposalReviewError {
    /// User cancelled (e.g. EOF or Ctrl+C)
    #[error("Review cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    IoError(String),
}

/// Port for obtaining the user's reply to a proposal
#[async_trait]
pub trait ProposalReviewPort: Send + Sync {
    /// Return the user's reply: approval, or the changes they want.
    async fn review_proposal(&self, proposal: &str) -> Result<String, ProposalReviewError>;
}

/// Approves every proposal (`--yes`)
pub struct AutoApproveProposal;

#[async_trait]
impl ProposalReviewPort for AutoApproveProposal {
    async fn review_proposal(&self, _proposal: &str) -> Result<String, ProposalReviewError> {
        Ok(APPROVAL_REPLY.to_string())
    }
}
