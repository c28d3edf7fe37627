//! Infrastructure layer for triad
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileReplConfig, Severity, expand_home,
};
pub use logging::JsonlConversationLogger;
pub use openai::{
    error::OpenAiError,
    gateway::{OpenAiConfig, OpenAiGateway},
    session::OpenAiSession,
};
