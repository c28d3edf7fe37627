//! Consensus Classifier
//!
//! Turns free-form role responses into the boolean signals that drive the
//! workflow state machine. Everything here is pure: no I/O, no state, the
//! same text always gives the same answer.
//!
//! | Signal | Function | Used for |
//! |--------|----------|----------|
//! | agreement | [`ConsensusClassifier::classify_agreement`] | Review → Complete, verifier's final confirmation, all-roles check |
//! | satisfaction | [`ConsensusClassifier::classify_satisfaction`] | Requirements role's final review |
//! | approval | [`ConsensusClassifier::signals_approval`] | User's reply to the first proposal |
//!
//! Classification is a keyword heuristic. Negative keywords veto positive
//! ones, so "I agree but this needs changes" is *not* agreement. False
//! positives and negatives are an accepted limitation; the round governor is
//! what guarantees termination, not the classifier.

pub mod classifier;
pub mod keywords;

pub use classifier::{ConsensusClassifier, classify_agreement, classify_satisfaction};
pub use keywords::{ClassifierKeywords, KeywordSet};
