//! Workflow subdomain: the three-role negotiation protocol
//!
//! - [`phase::Phase`] — the current named state
//! - [`turn`] — transcript entities
//! - [`governor`] — Round-Limit Governor
//! - [`state::WorkflowState`] — the owned, mutable session state
//! - [`machine::WorkflowMachine`] — pure transition function over that state
//! - [`summary::FinalSummary`] — what a finished workflow reports

pub mod governor;
pub mod machine;
pub mod phase;
pub mod state;
pub mod summary;
pub mod task;
pub mod turn;
