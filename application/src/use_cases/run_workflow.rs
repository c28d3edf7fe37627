//! Run Workflow use case.
//!
//! Runs a whole workflow non-interactively: starts a [`WorkflowSession`]
//! with the user's request, answers every proposal through a
//! [`ProposalReviewPort`], and returns once the workflow finished.

use crate::config::BehaviorConfig;
use crate::ports::agent_dispatcher::AgentDispatcher;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::WorkflowProgress;
use crate::ports::proposal_review::{ProposalReviewError, ProposalReviewPort};
use crate::use_cases::workflow_session::{SessionOutcome, WorkflowSession};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use triad_domain::{
    Author, DomainError, FinalSummary, Phase, Role, Transcript, UserRequest,
};

/// Errors that can occur while running a workflow.
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error("Workflow already started (phase: {0})")]
    AlreadyStarted(Phase),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Workflow stalled in phase {0}")]
    Stalled(Phase),

    #[error("Proposal review failed: {0}")]
    Review(#[from] ProposalReviewError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the [`RunWorkflowUseCase`].
#[derive(Debug, Clone)]
pub struct RunWorkflowInput {
    pub request: UserRequest,
    pub behavior: BehaviorConfig,
}

impl RunWorkflowInput {
    pub fn new(request: UserRequest, behavior: BehaviorConfig) -> Self {
        Self { request, behavior }
    }
}

/// Result of a finished workflow.
#[derive(Debug, Clone)]
pub struct RunWorkflowOutput {
    pub summary: FinalSummary,
    pub transcript: Transcript,
    pub dispatches: usize,
}

/// Use case for running one workflow from request to final summary.
pub struct RunWorkflowUseCase {
    dispatcher: Arc<dyn AgentDispatcher>,
    reviewer: Arc<dyn ProposalReviewPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunWorkflowUseCase {
    pub fn new(dispatcher: Arc<dyn AgentDispatcher>, reviewer: Arc<dyn ProposalReviewPort>) -> Self {
        Self {
            dispatcher,
            reviewer,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run the workflow with progress callbacks.
    pub async fn execute(
        &self,
        input: RunWorkflowInput,
        progress: Arc<dyn WorkflowProgress>,
    ) -> Result<RunWorkflowOutput, RunWorkflowError> {
        let mut session = WorkflowSession::new(input.behavior.machine(), self.dispatcher.clone())
            .with_progress(progress)
            .with_conversation_logger(self.conversation_logger.clone());

        let mut outcome = session.start(input.request).await?;
        loop {
            match outcome {
                SessionOutcome::AwaitingUser => {
                    let proposal = latest_proposal(session.transcript());
                    let reply = self.reviewer.review_proposal(proposal).await?;
                    info!("Proposal answered: {}", triad_domain::truncate(&reply, 80));
                    outcome = session.submit(&reply).await?;
                }
                SessionOutcome::Finished(summary) => {
                    return Ok(RunWorkflowOutput {
                        summary,
                        transcript: session.transcript().clone(),
                        dispatches: session.dispatch_count(),
                    });
                }
                SessionOutcome::Idle | SessionOutcome::Closed(_) => {
                    return Err(RunWorkflowError::Stalled(session.phase()));
                }
            }
        }
    }
}

fn latest_proposal(transcript: &Transcript) -> &str {
    transcript
        .iter()
        .rev()
        .find(|turn| turn.author == Author::Role(Role::Requirements))
        .map(|turn| turn.content.as_str())
        .unwrap_or_default()
}
