//! User request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A product request submitted by the user (Value Object)
///
/// This is the text that opens a workflow session and is handed to the
/// requirements role for its first proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    content: String,
}

impl UserRequest {
    /// Create a new request, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyRequest);
        }
        Ok(Self { content })
    }

    /// Get the request content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for UserRequest {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        UserRequest::try_new(s)
    }
}

impl TryFrom<String> for UserRequest {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        UserRequest::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let request = UserRequest::try_new("Build a todo app").unwrap();
        assert_eq!(request.content(), "Build a todo app");
        assert_eq!(request.to_string(), "Build a todo app");
    }

    #[test]
    fn test_empty_request_rejected() {
        assert_eq!(UserRequest::try_new(""), Err(DomainError::EmptyRequest));
        assert_eq!(UserRequest::try_new("  \n\t"), Err(DomainError::EmptyRequest));
    }

    #[test]
    fn test_try_from() {
        let request: UserRequest = "A CLI for notes".try_into().unwrap();
        assert_eq!(request.into_content(), "A CLI for notes");
    }
}
