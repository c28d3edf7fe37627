//! Text previews for log lines.

/// Shorten text to a single-line preview of at most `max_chars` characters.
///
/// Line breaks and runs of whitespace collapse to one space, so a role
/// response fits on one log line. Longer text ends in `...`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut preview: String = flat.chars().take(keep).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_kept() {
        assert_eq!(truncate("Build a timer", 20), "Build a timer");
    }

    #[test]
    fn test_long_text_is_cut() {
        assert_eq!(truncate("I agree with your proposal", 10), "I agree...");
    }

    #[test]
    fn test_multiline_response_flattens() {
        let response = "Proposal:\n\n  - start\n  - stop";
        assert_eq!(truncate(response, 80), "Proposal: - start - stop");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 11), "héllo wörld");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
