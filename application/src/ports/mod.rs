//! Port definitions (interfaces for external adapters)
//!
//! - [`llm_gateway`] — completion provider sessions
//! - [`agent_dispatcher`] — role prompt → response boundary
//! - [`progress`] — workflow progress callbacks
//! - [`proposal_review`] — the user's reply to a proposal
//! - [`conversation_logger`] — structured event log

pub mod agent_dispatcher;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod proposal_review;
