//! Domain layer for triad
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roles and the workflow
//!
//! Three fixed roles negotiate a product through a phase-driven protocol:
//!
//! - **Requirements** (Product Manager): proposes, specifies, reviews
//! - **Builder** (Software Engineer): discusses requirements and writes code
//! - **Verifier** (Test Engineer): tests and confirms
//!
//! The [`WorkflowMachine`] is a pure transition function over an owned
//! [`WorkflowState`]. It decides the next phase from free-text responses via
//! the [`ConsensusClassifier`], and the [`RoundGovernor`] caps every loop so
//! that any sequence of responses terminates.

pub mod artifact;
pub mod config;
pub mod consensus;
pub mod core;
pub mod prompt;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use artifact::{PLACEHOLDER_ARTIFACT, extract_code};
pub use config::OutputFormat;
pub use consensus::{
    ClassifierKeywords, ConsensusClassifier, KeywordSet, classify_agreement,
    classify_satisfaction,
};
pub use core::{
    error::DomainError, model::Model, request::UserRequest, role::Role, string::truncate,
};
pub use prompt::PromptTemplate;
pub use session::stream::StreamEvent;
pub use workflow::{
    governor::{CumulativeCounter, DEFAULT_ROUND_CAP, RoundCounter, RoundGovernor, RoundLimits},
    machine::{COMPLETION_NOTICE, Input, Next, Transition, WorkflowMachine},
    phase::Phase,
    state::{WorkflowPolicy, WorkflowState},
    summary::{FinalSummary, RoundUsage},
    task::Task,
    turn::{Author, Transcript, Turn},
};
