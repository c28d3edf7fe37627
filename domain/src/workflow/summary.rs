//! Finalization summary value objects

use super::governor::RoundGovernor;
use crate::core::role::Role;
use serde::{Deserialize, Serialize};

/// How much of one round budget was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundUsage {
    pub used: usize,
    pub cap: usize,
}

impl RoundUsage {
    pub fn new(used: usize, cap: usize) -> Self {
        Self { used, cap }
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.cap
    }
}

impl std::fmt::Display for RoundUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.used, self.cap)
    }
}

/// Outcome of a finished workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub iterations: usize,
    pub requirements_builder: RoundUsage,
    pub builder_verifier: RoundUsage,
    pub total_review: RoundUsage,
    pub artifact: String,
    /// Finalized because the review budget ran out, not by consensus
    pub forced: bool,
    /// At least one counter reached its cap
    pub round_limit_reached: bool,
}

impl FinalSummary {
    pub fn new(iterations: usize, governor: &RoundGovernor, artifact: &str, forced: bool) -> Self {
        let requirements_builder = RoundUsage::new(
            governor.requirements_builder.count(),
            governor.requirements_builder.cap(),
        );
        let builder_verifier = RoundUsage::new(
            governor.builder_verifier.count(),
            governor.builder_verifier.cap(),
        );
        let total_review =
            RoundUsage::new(governor.total_review.count(), governor.total_review.cap());
        Self {
            iterations,
            requirements_builder,
            builder_verifier,
            total_review,
            artifact: artifact.to_string(),
            forced,
            round_limit_reached: governor.any_exhausted(),
        }
    }

    /// Render the summary as the closing system turn
    pub fn render(&self) -> String {
        let team = Role::ALL
            .iter()
            .map(|r| r.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        let status = if self.forced {
            "Finalized after the review budget ran out"
        } else {
            "All agents have agreed on the final product"
        };

        let mut out = String::from("**Product Development Complete**\n\n");
        out.push_str("**Development Summary:**\n");
        out.push_str(&format!("• **Iterations**: {}\n", self.iterations));
        out.push_str(&format!("• **Team Members**: {}\n", team));
        out.push_str(&format!("• **Status**: {}\n", status));

        if self.round_limit_reached {
            out.push_str("\n**Round Limits Reached:**\n");
            out.push_str(&format!(
                "• {} & {}: {} rounds\n",
                Role::Requirements.display_name(),
                Role::Builder.display_name(),
                self.requirements_builder
            ));
            out.push_str(&format!(
                "• {} & {}: {} rounds\n",
                Role::Builder.display_name(),
                Role::Verifier.display_name(),
                self.builder_verifier
            ));
            out.push_str(&format!(
                "• {} Review: {} rounds (total across all iterations)\n",
                Role::Requirements.display_name(),
                self.total_review
            ));
        }

        out.push_str("\n**Final Code:**\n");
        if self.artifact.is_empty() {
            out.push_str("(no code was produced)\n");
        } else if self.artifact.starts_with("```") {
            out.push_str(&self.artifact);
            out.push('\n');
        } else {
            out.push_str(&format!("```\n{}\n```\n", self.artifact));
        }

        out.push_str("\n**Workflow Complete** - No further requests will be sent.");
        out
    }
}
