//! Configuration issues reported by [`FileConfig::validate`](super::FileConfig::validate)

use thiserror::Error;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A round cap of zero.
    InvalidRoundCap { field: String },
    /// A keyword list that cannot drive the classifier.
    InvalidKeywords { field: String },
    /// An empty model name.
    EmptyModelName { field: String },
    /// A numeric setting outside its accepted range.
    OutOfRange { field: String },
}

/// A detected issue in the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ConfigValidationError {
    /// Collect the error-severity issues, if any.
    pub fn from_issues(issues: &[ConfigIssue]) -> Option<Self> {
        let messages: Vec<String> = issues
            .iter()
            .filter(|issue| issue.is_error())
            .map(|issue| issue.message.clone())
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(ConfigValidationError::Invalid(messages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_errors_become_validation_error() {
        let warning = ConfigIssue::warning(
            ConfigIssueCode::OutOfRange {
                field: "provider.temperature".to_string(),
            },
            "provider.temperature: clamped",
        );
        assert!(ConfigValidationError::from_issues(&[warning.clone()]).is_none());

        let error = ConfigIssue::error(
            ConfigIssueCode::InvalidRoundCap {
                field: "workflow.review_rounds".to_string(),
            },
            "workflow.review_rounds: must be at least 1",
        );
        let err = ConfigValidationError::from_issues(&[warning, error]).unwrap();
        assert_eq!(
            err.to_string(),
            "invalid configuration: workflow.review_rounds: must be at least 1"
        );
    }
}
