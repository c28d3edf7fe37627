//! Prompt domain
//!
//! Composes the text sent to a role for each [`Task`](crate::workflow::task::Task):
//! the discussion so far and task-specific guidance. Role instructions travel
//! separately as the system prompt.

mod template;

pub use template::PromptTemplate;
