//! Code artifacts carried between phases.
//!
//! [`extractor::extract_code`] pulls fenced code regions out of a response.

pub mod extractor;

pub use extractor::{PLACEHOLDER_ARTIFACT, extract_code};
