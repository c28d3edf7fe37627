//! Classifier keyword configuration from TOML (`[classifier]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use triad_domain::consensus::keywords::{
    DEFAULT_AGREEMENT, DEFAULT_APPROVAL, DEFAULT_DISAGREEMENT, DEFAULT_SATISFIED,
    DEFAULT_UNSATISFIED,
};
use triad_domain::{ClassifierKeywords, KeywordSet};

/// Keyword lists for the consensus classifier
///
/// Any list left out keeps its built-in default.
///
/// # Example
///
/// ```toml
/// [classifier]
/// agreement = ["agree", "lgtm", "approve"]
/// disagreement = ["disagree", "needs changes"]
/// approval = ["yes", "ship it"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClassifierConfig {
    pub agreement: Option<Vec<String>>,
    pub disagreement: Option<Vec<String>>,
    pub satisfied: Option<Vec<String>>,
    pub unsatisfied: Option<Vec<String>>,
    /// Phrases that accept the first proposal
    pub approval: Option<Vec<String>>,
}

fn or_default(list: &Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match list {
        Some(list) => list.clone(),
        None => default.iter().map(|k| k.to_string()).collect(),
    }
}

impl FileClassifierConfig {
    /// Build the keyword lists; an invalid set falls back to the defaults.
    pub fn parse_keywords(&self) -> (ClassifierKeywords, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = ClassifierKeywords::default();

        let mut keyword_set = |field: &str, affirmative: Vec<String>, negative: Vec<String>| {
            KeywordSet::new(affirmative, negative).map_err(|e| {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidKeywords {
                        field: format!("classifier.{field}"),
                    },
                    format!("classifier.{field}: {e}"),
                ));
            })
        };

        let agreement = keyword_set(
            "agreement",
            or_default(&self.agreement, DEFAULT_AGREEMENT),
            or_default(&self.disagreement, DEFAULT_DISAGREEMENT),
        )
        .unwrap_or_else(|_| defaults.agreement.clone());
        let satisfaction = keyword_set(
            "satisfied",
            or_default(&self.satisfied, DEFAULT_SATISFIED),
            or_default(&self.unsatisfied, DEFAULT_UNSATISFIED),
        )
        .unwrap_or_else(|_| defaults.satisfaction.clone());

        let keywords = match ClassifierKeywords::new(
            agreement.clone(),
            satisfaction.clone(),
            or_default(&self.approval, DEFAULT_APPROVAL),
        ) {
            Ok(keywords) => keywords,
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidKeywords {
                        field: "classifier.approval".to_string(),
                    },
                    format!("classifier.approval: {e}"),
                ));
                ClassifierKeywords {
                    agreement,
                    satisfaction,
                    approval: defaults.approval,
                }
            }
        };

        (keywords, issues)
    }
}
