//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_workflow;
pub mod workflow_session;
