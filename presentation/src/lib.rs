//! Presentation layer for triad
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, the interactive proposal review and the chat REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod review;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use review::StdinProposalReview;
