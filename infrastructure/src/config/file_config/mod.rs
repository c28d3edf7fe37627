//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod classifier;
mod display;
mod logging;
mod provider;
mod workflow;

pub use classifier::FileClassifierConfig;
pub use display::{FileOutputConfig, FileReplConfig};
pub use logging::FileLoggingConfig;
pub use provider::FileProviderConfig;
pub use workflow::FileWorkflowConfig;

pub use logging::expand_home;

use super::issue::{ConfigIssue, ConfigValidationError};
use serde::{Deserialize, Serialize};
use triad_application::BehaviorConfig;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round caps and consensus window
    pub workflow: FileWorkflowConfig,
    /// Consensus classifier keyword lists
    pub classifier: FileClassifierConfig,
    /// Completion provider settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors abort startup; warnings are reported and a default is used.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.workflow.parse_policy().1);
        issues.extend(self.classifier.parse_keywords().1);
        issues.extend(self.provider.validate());
        issues
    }

    /// Validate and fail on any error-severity issue, returning the warnings.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        match ConfigValidationError::from_issues(&issues) {
            Some(err) => Err(err),
            None => Ok(issues),
        }
    }

    /// Build the application behavior from the workflow, classifier and
    /// provider sections.
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_policy(self.workflow.parse_policy().0)
            .with_keywords(self.classifier.parse_keywords().0)
            .with_timeout_seconds(self.provider.timeout_seconds.filter(|s| *s > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use triad_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[workflow]
requirements_builder_rounds = 3
builder_verifier_rounds = 1
review_rounds = 4

[classifier]
approval = ["ship it"]

[provider]
base_url = "http://localhost:11434/v1"
model = "llama3.1"
timeout_seconds = 90

[output]
format = "full"
color = false

[logging]
conversation_log = "/tmp/triad.jsonl"

[repl]
show_progress = false
history_file = "~/.local/share/triad/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workflow.requirements_builder_rounds, 3);
        assert_eq!(config.workflow.recent_window_per_role, 2);
        assert_eq!(config.provider.model, "llama3.1");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.validate().is_empty());

        let behavior = config.behavior();
        assert_eq!(behavior.policy.limits.review, 4);
        assert_eq!(behavior.keywords.approval, vec!["ship it".to_string()]);
        assert_eq!(behavior.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[workflow]
review_rounds = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workflow.review_rounds, 1);
        // Defaults should apply
        assert_eq!(config.workflow.builder_verifier_rounds, 2);
        assert_eq!(config.provider.model, "gpt-4o");
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.check().unwrap().is_empty());
        assert_eq!(config.behavior().timeout, None);
    }

    #[test]
    fn test_check_rejects_errors() {
        let toml_str = r#"
[workflow]
builder_verifier_rounds = 0

[classifier]
agreement = []
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let err = config.check().unwrap_err();
        let ConfigValidationError::Invalid(messages) = err;
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_check_passes_warnings_through() {
        let config = FileConfig {
            workflow: FileWorkflowConfig {
                recent_window_per_role: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings = config.check().unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
