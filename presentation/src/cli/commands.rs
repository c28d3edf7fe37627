//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every turn of the transcript followed by the summary
    Full,
    /// Only the final summary
    Summary,
    /// Transcript and summary as JSON
    Json,
}

impl From<OutputFormat> for triad_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => triad_domain::OutputFormat::Full,
            OutputFormat::Summary => triad_domain::OutputFormat::Summary,
            OutputFormat::Json => triad_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for triad
#[derive(Parser, Debug)]
#[command(name = "triad")]
#[command(author, version, about = "Three LLM roles build a product together and stop when they agree")]
#[command(long_about = r#"
Triad runs a product manager, a software engineer and a test engineer against
one request until they reach consensus or run out of rounds.

The workflow:
1. The Product Manager proposes a design and waits for your confirmation
2. The Product Manager writes a specification
3. The Software Engineer asks questions, then writes code
4. The Test Engineer tests; the engineers iterate
5. The Product Manager reviews and either accepts or starts a new iteration

Every loop is bounded by a round limit, so a run always terminates.

Configuration files are loaded from (in priority order):
1. --config <path>                  Explicit config file
2. ./triad.toml or ./.triad.toml    Project-level config
3. ~/.config/triad/config.toml      Global config

Example:
  triad "A command-line pomodoro timer"
  triad --yes --output full "A URL shortener with an in-memory store"
  triad --chat --model gpt-4o-mini
"#)]
pub struct Cli {
    /// The product request (not required in chat mode)
    pub request: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model used by all three roles (overrides [provider] model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Approve the first proposal without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
