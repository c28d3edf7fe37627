//! Code-Block Extractor
//!
//! Finds every fenced region (```` ``` ```` ... ```` ``` ````, non-greedy,
//! across lines) and joins them in order of appearance with a blank line.
//! The fences are kept, so extracting from an extraction returns the same
//! text. The function is total: zero fences or an unpaired fence simply
//! yield no match.

use regex::Regex;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("fenced block pattern is valid"));

/// Artifact used when the builder runs out of discussion rounds without code
pub const PLACEHOLDER_ARTIFACT: &str = "// Code will be provided in next iteration";

/// Concatenate all fenced code regions of `text`, or return an empty string.
pub fn extract_code(text: &str) -> String {
    FENCED_BLOCK
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
