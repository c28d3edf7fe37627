//! Application layer for triad
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    agent_dispatcher::{AgentDispatcher, FALLBACK_RESPONSE, GatewayDispatcher},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    progress::{NoProgress, WorkflowProgress},
    proposal_review::{
        APPROVAL_REPLY, AutoApproveProposal, ProposalReviewError, ProposalReviewPort,
    },
};
pub use use_cases::run_workflow::{
    RunWorkflowError, RunWorkflowInput, RunWorkflowOutput, RunWorkflowUseCase,
};
pub use use_cases::workflow_session::{SessionOutcome, WorkflowSession};
