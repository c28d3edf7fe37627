//! Console output formatter for workflow results

use colored::{ColoredString, Colorize};
use triad_application::RunWorkflowOutput;
use triad_domain::{Author, FinalSummary, OutputFormat, Role, RoundUsage, Turn};

/// Formats transcripts and summaries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors on or off for everything this crate prints
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format a finished run in the requested format
    pub fn format(output: &RunWorkflowOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_full(output),
            OutputFormat::Summary => Self::format_summary(&output.summary),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Every turn, then the summary
    pub fn format_full(output: &RunWorkflowOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Triad Transcript"));
        out.push('\n');

        for turn in output.transcript.iter() {
            // The closing System turn repeats the summary printed below
            if turn.author == Author::System && turn.content.contains("**Workflow Complete**") {
                continue;
            }
            out.push_str(&Self::format_turn(turn));
            out.push('\n');
        }

        out.push_str(&Self::section_header("Summary"));
        out.push_str(&Self::format_summary(&output.summary));
        out.push_str(&format!(
            "\n{} {}\n",
            "Dispatches:".dimmed(),
            output.dispatches
        ));
        out.push_str(&Self::footer());
        out
    }

    /// Transcript and summary as pretty JSON
    pub fn format_json(output: &RunWorkflowOutput) -> String {
        let value = serde_json::json!({
            "summary": output.summary,
            "transcript": output.transcript,
            "dispatches": output.dispatches,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Concise outcome: how it ended, round usage, final code
    pub fn format_summary(summary: &FinalSummary) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{}\n\n",
            "=== Product Development Complete ===".cyan().bold()
        ));

        let outcome = if summary.forced {
            "Finalized at the review round limit".yellow().bold()
        } else {
            "All roles reached consensus".green().bold()
        };
        out.push_str(&format!("{} {}\n", "Outcome:".bold(), outcome));
        out.push_str(&format!(
            "{} {}\n\n",
            "Iterations:".bold(),
            summary.iterations
        ));

        out.push_str(&format!(
            "{}\n",
            Self::usage_line("Requirements ↔ Builder", &summary.requirements_builder)
        ));
        out.push_str(&format!(
            "{}\n",
            Self::usage_line("Builder ↔ Verifier", &summary.builder_verifier)
        ));
        out.push_str(&format!(
            "{}\n",
            Self::usage_line("Review", &summary.total_review)
        ));

        out.push_str(&format!("\n{}\n", "Final Code:".cyan().bold()));
        out.push_str(&summary.artifact);
        out.push('\n');
        out
    }

    /// One transcript turn with a colored author line
    pub fn format_turn(turn: &Turn) -> String {
        format!(
            "\n{}\n{}\n",
            Self::author_label(turn.author),
            Self::indent(&turn.content, "  ")
        )
    }

    fn author_label(author: Author) -> ColoredString {
        match author {
            Author::User => "── User ──".blue().bold(),
            Author::System => "── System ──".dimmed(),
            Author::Role(role) => {
                let label = format!("── {} {} ──", role.icon(), role.display_name());
                match role {
                    Role::Requirements => label.magenta().bold(),
                    Role::Builder => label.yellow().bold(),
                    Role::Verifier => label.green().bold(),
                }
            }
        }
    }

    fn usage_line(label: &str, usage: &RoundUsage) -> String {
        let marker = if usage.is_exhausted() {
            "limit reached".red().to_string()
        } else {
            String::new()
        };
        format!("  {:<24} {:>5}  {}", label, usage.to_string(), marker)
            .trim_end()
            .to_string()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
