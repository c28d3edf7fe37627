//! Interactive proposal review for one-shot runs.
//!
//! When the Product Manager has proposed a design, the user sees:
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   💡 Proposal Ready for Review
//! ═══════════════════════════════════════════════════════════════
//!
//! Reply with your approval, or describe the changes you want.
//!   /approve  - Accept the proposal as-is
//!   /cancel   - Stop the workflow
//!
//! review>
//! ```
//!
//! Any other line is sent to the Product Manager unchanged.

use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use triad_application::{APPROVAL_REPLY, ProposalReviewError, ProposalReviewPort};

/// Reads the user's reply to a proposal from stdin.
///
/// Prompts go to stderr so stdout stays reserved for the result.
pub struct StdinProposalReview;

impl StdinProposalReview {
    pub fn new() -> Self {
        Self
    }

    fn display_prompt(&self) {
        let rule = "═══════════════════════════════════════════════════════════════";
        eprintln!();
        eprintln!("{}", rule.magenta().bold());
        eprintln!("{}", "  💡 Proposal Ready for Review".magenta().bold());
        eprintln!("{}", rule.magenta().bold());
        eprintln!();
        eprintln!("Reply with your approval, or describe the changes you want.");
        eprintln!("  {}  - Accept the proposal as-is", "/approve".green());
        eprintln!("  {}   - Stop the workflow", "/cancel".red());
        eprintln!();
    }

    /// Read lines until one yields a reply.
    fn read_reply<R: BufRead>(reader: &mut R) -> Result<String, ProposalReviewError> {
        loop {
            eprint!("{} ", "review>".magenta().bold());
            io::stderr()
                .flush()
                .map_err(|e| ProposalReviewError::IoError(format!("Failed to flush: {}", e)))?;

            let mut input = String::new();
            let read = reader
                .read_line(&mut input)
                .map_err(|e| ProposalReviewError::IoError(format!("Failed to read input: {}", e)))?;
            if read == 0 {
                return Err(ProposalReviewError::Cancelled);
            }

            match input.trim() {
                "" => continue,
                "/approve" | "/a" => return Ok(APPROVAL_REPLY.to_string()),
                "/cancel" | "/quit" | "/q" => return Err(ProposalReviewError::Cancelled),
                reply => return Ok(reply.to_string()),
            }
        }
    }
}

impl Default for StdinProposalReview {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProposalReviewPort for StdinProposalReview {
    async fn review_proposal(&self, _proposal: &str) -> Result<String, ProposalReviewError> {
        // The proposal itself was already echoed as a turn
        self.display_prompt();
        let stdin = io::stdin();
        Self::read_reply(&mut stdin.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_approve_shortcut() {
        let mut input = Cursor::new("\n/approve\n");
        assert_eq!(
            StdinProposalReview::read_reply(&mut input).unwrap(),
            APPROVAL_REPLY
        );
    }

    #[test]
    fn test_free_text_is_passed_through() {
        let mut input = Cursor::new("  Please add a dark mode  \n");
        assert_eq!(
            StdinProposalReview::read_reply(&mut input).unwrap(),
            "Please add a dark mode"
        );
    }

    #[test]
    fn test_eof_and_cancel() {
        let mut empty = Cursor::new("");
        assert_eq!(
            StdinProposalReview::read_reply(&mut empty),
            Err(ProposalReviewError::Cancelled)
        );
        let mut cancel = Cursor::new("/cancel\n");
        assert_eq!(
            StdinProposalReview::read_reply(&mut cancel),
            Err(ProposalReviewError::Cancelled)
        );
    }
}
