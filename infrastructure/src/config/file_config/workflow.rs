//! Workflow configuration from TOML (`[workflow]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use triad_domain::{DEFAULT_ROUND_CAP, DomainError, RoundLimits, WorkflowPolicy};
use triad_domain::workflow::state::DEFAULT_WINDOW_PER_ROLE;

/// Round caps and the consensus window
///
/// # Example
///
/// ```toml
/// [workflow]
/// requirements_builder_rounds = 2
/// builder_verifier_rounds = 2
/// review_rounds = 2
/// recent_window_per_role = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    pub requirements_builder_rounds: usize,
    pub builder_verifier_rounds: usize,
    pub review_rounds: usize,
    /// Turns per role inspected by the all-roles-agreed check
    pub recent_window_per_role: usize,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            requirements_builder_rounds: DEFAULT_ROUND_CAP,
            builder_verifier_rounds: DEFAULT_ROUND_CAP,
            review_rounds: DEFAULT_ROUND_CAP,
            recent_window_per_role: DEFAULT_WINDOW_PER_ROLE,
        }
    }
}

impl FileWorkflowConfig {
    /// Build the workflow policy, replacing invalid caps with the default.
    pub fn parse_policy(&self) -> (WorkflowPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let mut limits = RoundLimits {
            requirements_builder: self.requirements_builder_rounds,
            builder_verifier: self.builder_verifier_rounds,
            review: self.review_rounds,
        };
        // validate() reports one counter at a time; repair it and look again
        while let Err(err) = limits.validate() {
            let DomainError::InvalidRoundCap { counter, .. } = err else {
                break;
            };
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidRoundCap {
                    field: format!("workflow.{counter}_rounds"),
                },
                format!("workflow.{counter}_rounds: {err}"),
            ));
            match counter {
                "requirements_builder" => limits.requirements_builder = DEFAULT_ROUND_CAP,
                "builder_verifier" => limits.builder_verifier = DEFAULT_ROUND_CAP,
                _ => limits.review = DEFAULT_ROUND_CAP,
            }
        }

        if self.recent_window_per_role == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "workflow.recent_window_per_role".to_string(),
                },
                "workflow.recent_window_per_role: 0 is too small, using 1",
            ));
        }

        let policy = WorkflowPolicy::default()
            .with_limits(limits)
            .with_window_per_role(self.recent_window_per_role);
        (policy, issues)
    }
}
