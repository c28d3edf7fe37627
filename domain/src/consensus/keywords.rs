//! Keyword lists used by the consensus classifier
//!
//! Keyword lists are configuration data. The defaults below can be replaced
//! from the `[classifier]` config section without touching transition logic.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A pair of disjoint keyword lists: affirmative and negative
///
/// Matching is case-insensitive substring membership; keywords are stored
/// lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    affirmative: Vec<String>,
    negative: Vec<String>,
}

impl KeywordSet {
    pub fn new<A, N>(affirmative: A, negative: N) -> Result<Self, DomainError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let affirmative = normalize(affirmative);
        let negative = normalize(negative);

        if affirmative.is_empty() {
            return Err(DomainError::InvalidKeywords(
                "affirmative keyword list is empty".to_string(),
            ));
        }
        if let Some(shared) = affirmative.iter().find(|k| negative.contains(k)) {
            return Err(DomainError::InvalidKeywords(format!(
                "'{shared}' is both affirmative and negative"
            )));
        }

        Ok(Self {
            affirmative,
            negative,
        })
    }

    /// `has_affirmative && !has_negative`
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        let has_affirmative = self.affirmative.iter().any(|k| text.contains(k.as_str()));
        let has_negative = self.negative.iter().any(|k| text.contains(k.as_str()));
        has_affirmative && !has_negative
    }

    pub fn affirmative(&self) -> &[String] {
        &self.affirmative
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }
}

fn normalize<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

pub const DEFAULT_AGREEMENT: &[&str] = &[
    "agree",
    "approve",
    "satisfied",
    "ready",
    "final",
    "complete",
    "consensus",
    "unanimous",
    "accepted",
    "endorsed",
    "confirmed",
    "this looks good",
    "this is perfect",
    "no further changes needed",
    "ready for production",
    "ready for delivery",
    "meets all requirements",
];

pub const DEFAULT_DISAGREEMENT: &[&str] = &[
    "disagree",
    "not satisfied",
    "needs changes",
    "not ready",
    "requires modification",
    "still needs work",
    "not approved",
];

pub const DEFAULT_SATISFIED: &[&str] = &[
    "satisfied",
    "approve",
    "ready",
    "perfect",
    "excellent",
    "final",
    "delivery ready",
    "production ready",
    "meets all requirements",
    "no further changes",
    "this is exactly what we needed",
    "ready to ship",
    "ready for users",
    "final approval",
];

pub const DEFAULT_UNSATISFIED: &[&str] = &[
    "change",
    "modify",
    "improve",
    "revise",
    "update",
    "iteration",
    "not satisfied",
    "needs work",
    "not ready",
    "requires changes",
    "still needs",
    "not quite right",
    "missing something",
];

pub const DEFAULT_APPROVAL: &[&str] = &[
    "i agree with your proposal",
    "i agree",
    "yes",
    "approved",
    "proceed",
    "go ahead",
];

/// Every keyword list the classifier needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierKeywords {
    pub agreement: KeywordSet,
    pub satisfaction: KeywordSet,
    /// User confirmation phrases (no negative list: anything else is a change request)
    pub approval: Vec<String>,
}

impl ClassifierKeywords {
    pub fn new(
        agreement: KeywordSet,
        satisfaction: KeywordSet,
        approval: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, DomainError> {
        let approval = normalize(approval);
        if approval.is_empty() {
            return Err(DomainError::InvalidKeywords(
                "approval keyword list is empty".to_string(),
            ));
        }
        Ok(Self {
            agreement,
            satisfaction,
            approval,
        })
    }
}

impl Default for ClassifierKeywords {
    fn default() -> Self {
        Self {
            agreement: KeywordSet {
                affirmative: normalize(DEFAULT_AGREEMENT),
                negative: normalize(DEFAULT_DISAGREEMENT),
            },
            satisfaction: KeywordSet {
                affirmative: normalize(DEFAULT_SATISFIED),
                negative: normalize(DEFAULT_UNSATISFIED),
            },
            approval: normalize(DEFAULT_APPROVAL),
        }
    }
}
