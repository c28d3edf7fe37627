//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Request cannot be empty")]
    EmptyRequest,

    #[error("Invalid round cap for {counter}: {value} (must be at least 1)")]
    InvalidRoundCap { counter: &'static str, value: usize },

    #[error("Invalid keyword configuration: {0}")]
    InvalidKeywords(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
