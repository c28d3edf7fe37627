//! Keyword-based consensus classification

use super::keywords::ClassifierKeywords;
use crate::core::role::Role;
use crate::workflow::turn::Turn;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DEFAULT_CLASSIFIER: LazyLock<ConsensusClassifier> =
    LazyLock::new(ConsensusClassifier::default);

/// Agreement signal using the default keyword lists
pub fn classify_agreement(text: &str) -> bool {
    DEFAULT_CLASSIFIER.classify_agreement(text)
}

/// Satisfaction signal using the default keyword lists
pub fn classify_satisfaction(text: &str) -> bool {
    DEFAULT_CLASSIFIER.classify_satisfaction(text)
}

/// Maps response text to agreement / satisfaction / approval signals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusClassifier {
    keywords: ClassifierKeywords,
}

impl ConsensusClassifier {
    pub fn new(keywords: ClassifierKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &ClassifierKeywords {
        &self.keywords
    }

    /// Has the author signalled agreement? Empty text never agrees.
    pub fn classify_agreement(&self, text: &str) -> bool {
        self.keywords.agreement.matches(text)
    }

    /// Is the requirements role satisfied with the product?
    pub fn classify_satisfaction(&self, text: &str) -> bool {
        self.keywords.satisfaction.matches(text)
    }

    /// Did the user approve the proposal?
    pub fn signals_approval(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords
            .approval
            .iter()
            .any(|k| text.contains(k.as_str()))
    }

    /// Set-cover check over a window of recent turns.
    ///
    /// Every role in `roles` needs at least one turn in `recent_turns` that
    /// names it and independently classifies as agreement. Order inside the
    /// window is irrelevant. Turns that fall outside the window are not
    /// seen, so a role that agreed early in a long iteration is missed.
    pub fn all_roles_agreed(&self, recent_turns: &[Turn], roles: &[Role]) -> bool {
        roles.iter().all(|role| {
            recent_turns
                .iter()
                .any(|turn| turn.names_role(*role) && self.classify_agreement(&turn.content))
        })
    }
}
