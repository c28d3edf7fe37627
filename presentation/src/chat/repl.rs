//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use triad_application::{
    AgentDispatcher, BehaviorConfig, ConversationLogger, NoConversationLogger, NoProgress,
    SessionOutcome, WorkflowProgress, WorkflowSession,
};
use triad_domain::{Phase, UserRequest};

const HISTORY_CAPACITY: usize = 1000;

/// What the loop does after a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Exit,
}

/// Interactive chat REPL driving one workflow at a time
pub struct ChatRepl {
    behavior: BehaviorConfig,
    dispatcher: Arc<dyn AgentDispatcher>,
    progress: Arc<dyn WorkflowProgress>,
    conversation_logger: Arc<dyn ConversationLogger>,
    session: WorkflowSession,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(behavior: BehaviorConfig, dispatcher: Arc<dyn AgentDispatcher>) -> Self {
        let session = WorkflowSession::new(behavior.machine(), dispatcher.clone());
        Self {
            behavior,
            dispatcher,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
            session,
            history_file: dirs::data_dir().map(|p| p.join("triad").join("history.txt")),
        }
    }

    /// Set the progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn WorkflowProgress>) -> Self {
        self.progress = progress;
        self.reset_session();
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self.reset_session();
        self
    }

    /// Override the history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    fn reset_session(&mut self) {
        self.session = WorkflowSession::new(self.behavior.machine(), self.dispatcher.clone())
            .with_progress(self.progress.clone())
            .with_conversation_logger(self.conversation_logger.clone());
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(ref path) = self.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(_) => editor,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("triad".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandResult::Exit {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "╭─────────────────────────────────────────────╮".cyan());
        println!("{}", "│             Triad - Chat Mode               │".cyan());
        println!("{}", "╰─────────────────────────────────────────────╯".cyan());
        println!();
        println!("{}", self.session.welcome());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /status           - Show phase and round usage");
        println!("  /transcript       - Show the conversation so far");
        println!("  /code             - Show the latest code");
        println!("  /new              - Start a new workflow");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&mut self, cmd: &str) -> CommandResult {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandResult::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
                CommandResult::Continue
            }
            "/status" => {
                println!("\n{}\n", self.status_text());
                CommandResult::Continue
            }
            "/transcript" => {
                if self.session.transcript().is_empty() {
                    println!("\nNo messages yet.\n");
                }
                for turn in self.session.transcript().iter() {
                    print!("{}", ConsoleFormatter::format_turn(turn));
                }
                println!();
                CommandResult::Continue
            }
            "/code" => {
                println!("\n{}\n", self.code_text());
                CommandResult::Continue
            }
            "/new" => {
                self.reset_session();
                println!("\nStarted a new workflow. Describe what you want to build.\n");
                CommandResult::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandResult::Continue
            }
        }
    }

    fn status_text(&self) -> String {
        let state = self.session.state();
        let governor = state.governor();
        let mut lines = vec![
            format!("{} {}", "Phase:".bold(), state.phase().display_name()),
            format!("{} {}", "Iteration:".bold(), state.iteration_count()),
            format!(
                "{} {}/{}",
                "Requirements ↔ Builder:".bold(),
                governor.requirements_builder.count(),
                governor.requirements_builder.cap()
            ),
            format!(
                "{} {}/{}",
                "Builder ↔ Verifier:".bold(),
                governor.builder_verifier.count(),
                governor.builder_verifier.cap()
            ),
            format!(
                "{} {}/{}",
                "Review:".bold(),
                governor.total_review.count(),
                governor.total_review.cap()
            ),
            format!("{} {}", "Dispatches:".bold(), self.session.dispatch_count()),
        ];
        if let Some(role) = state.phase().expected_role() {
            lines.push(format!("{} {}", "Waiting on:".bold(), role.display_name()));
        }
        lines.join("\n")
    }

    fn code_text(&self) -> String {
        let artifact = self.session.state().artifact();
        if artifact.is_empty() {
            "No code yet.".to_string()
        } else {
            artifact.to_string()
        }
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        let result = if self.session.phase() == Phase::Initial {
            match UserRequest::try_new(message) {
                Ok(request) => self.session.start(request).await,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return;
                }
            }
        } else {
            self.session.submit(message).await
        };

        match result {
            Ok(SessionOutcome::AwaitingUser) => {
                if self.session.phase() == Phase::AwaitingUserConfirmation {
                    println!(
                        "\n{}",
                        "Approve the proposal or describe the changes you want.".cyan()
                    );
                }
            }
            Ok(SessionOutcome::Idle) => {
                println!(
                    "\n{}",
                    "The workflow is paused. Send a message to resume it.".dimmed()
                );
            }
            Ok(SessionOutcome::Finished(summary)) => {
                println!("\n{}", ConsoleFormatter::format_summary(&summary));
                println!("{}", "Type /new to start another workflow.".dimmed());
            }
            Ok(SessionOutcome::Closed(notice)) => {
                println!("{}", notice.yellow());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
