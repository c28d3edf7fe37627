//! Progress reporting for workflow execution
//!
//! Everything here writes to stderr so stdout only carries the final
//! result (which may be JSON).

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use triad_application::WorkflowProgress;
use triad_domain::{FinalSummary, Phase, Role, Task, Turn};

struct Active {
    bar: ProgressBar,
    label: String,
    chars: usize,
}

/// Reports progress with a spinner per dispatch
pub struct ProgressReporter {
    active: Mutex<Option<Active>>,
    echo_turns: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
            echo_turns: true,
        }
    }

    /// Print each transcript turn as it is recorded
    pub fn with_turns(mut self, echo: bool) -> Self {
        self.echo_turns = echo;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn role_prefix(role: Role) -> String {
        format!("{} {}", role.icon(), role.display_name())
    }

    fn clear(&self) {
        if let Ok(mut active) = self.active.lock()
            && let Some(active) = active.take()
        {
            active.bar.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgress for ProgressReporter {
    fn on_dispatch(&self, role: Role, task: Task) {
        self.clear();

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix(Self::role_prefix(role));
        bar.set_message(task.label().to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut active) = self.active.lock() {
            *active = Some(Active {
                bar,
                label: task.label().to_string(),
                chars: 0,
            });
        }
    }

    fn on_chunk(&self, _role: Role, chunk: &str) {
        if let Ok(mut active) = self.active.lock()
            && let Some(active) = active.as_mut()
        {
            active.chars += chunk.chars().count();
            active
                .bar
                .set_message(format!("{} ({} chars)", active.label, active.chars));
        }
    }

    fn on_response(&self, _role: Role, _text: &str) {
        self.clear();
    }

    fn on_transition(&self, from: Phase, to: Phase) {
        eprintln!(
            "{} {} → {}",
            "->".cyan(),
            from.display_name().dimmed(),
            to.display_name().bold()
        );
    }

    fn on_finished(&self, _summary: &FinalSummary) {
        self.clear();
    }

    fn on_turn(&self, turn: &Turn) {
        if self.echo_turns {
            eprint!("{}", ConsoleFormatter::format_turn(turn));
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl WorkflowProgress for SimpleProgress {
    fn on_dispatch(&self, role: Role, task: Task) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::role_prefix(role).bold(),
            task.label()
        );
    }

    fn on_response(&self, role: Role, text: &str) {
        eprintln!(
            "  {} {} responded ({} chars)",
            "v".green(),
            role.display_name(),
            text.chars().count()
        );
    }

    fn on_transition(&self, from: Phase, to: Phase) {
        eprintln!("  {} → {}", from.display_name(), to.display_name());
    }

    fn on_finished(&self, summary: &FinalSummary) {
        let outcome = if summary.forced {
            "round limit"
        } else {
            "consensus"
        };
        eprintln!(
            "{} finished after {} iteration(s) ({})",
            "=".cyan(),
            summary.iterations,
            outcome
        );
    }

    fn on_turn(&self, turn: &Turn) {
        eprint!("{}", ConsoleFormatter::format_turn(turn));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_active_dispatch() {
        let reporter = ProgressReporter::new().with_turns(false);
        reporter.on_dispatch(Role::Builder, Task::TestCode);
        reporter.on_chunk(Role::Builder, "héllo");
        reporter.on_chunk(Role::Builder, " world");
        {
            let active = reporter.active.lock().unwrap();
            let active = active.as_ref().unwrap();
            assert_eq!(active.chars, 11);
            assert_eq!(active.label, Task::TestCode.label());
        }

        reporter.on_response(Role::Builder, "héllo world");
        assert!(reporter.active.lock().unwrap().is_none());
    }

    #[test]
    fn test_new_dispatch_replaces_spinner() {
        let reporter = ProgressReporter::new().with_turns(false);
        reporter.on_dispatch(Role::Requirements, Task::ProposeDesign);
        reporter.on_dispatch(Role::Verifier, Task::FinalConfirmation);
        let active = reporter.active.lock().unwrap();
        assert_eq!(
            active.as_ref().unwrap().label,
            Task::FinalConfirmation.label()
        );
    }

    #[test]
    fn test_chunk_without_dispatch_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_chunk(Role::Verifier, "stray");
        assert!(reporter.active.lock().unwrap().is_none());
    }
}
