//! Interactive chat module
//!
//! Provides a reedline-based interactive chat interface for the workflow.

mod repl;

pub use repl::ChatRepl;
