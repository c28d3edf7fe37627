//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases
//! behave: the workflow's round limits and keyword lists, and how long a
//! single completion call may take.

use std::time::Duration;
use triad_domain::{ClassifierKeywords, ConsensusClassifier, WorkflowMachine, WorkflowPolicy};

/// Application behavior configuration.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a completion before falling back.
    pub timeout: Option<Duration>,
    /// Round limits and consensus window of the state machine.
    pub policy: WorkflowPolicy,
    /// Keyword lists used by the consensus classifier.
    pub keywords: ClassifierKeywords,
}

impl BehaviorConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout from an optional number of seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }

    pub fn with_policy(mut self, policy: WorkflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_keywords(mut self, keywords: ClassifierKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Build the state machine these settings describe
    pub fn machine(&self) -> WorkflowMachine {
        WorkflowMachine::new(ConsensusClassifier::new(self.keywords.clone()), self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_domain::RoundLimits;

    #[test]
    fn test_timeout_from_seconds() {
        let config = BehaviorConfig::default().with_timeout_seconds(Some(30));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        let config = config.with_timeout_seconds(None);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_machine_uses_policy() {
        let limits = RoundLimits {
            requirements_builder: 3,
            builder_verifier: 1,
            review: 4,
        };
        let config = BehaviorConfig::default().with_policy(WorkflowPolicy::default().with_limits(limits));
        let state = config.machine().initial_state();
        assert_eq!(state.governor().requirements_builder.cap(), 3);
        assert_eq!(state.governor().total_review.cap(), 4);
    }
}
