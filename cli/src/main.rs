//! triad CLI entrypoint
//!
//! Wires together all layers using dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use triad_application::{
    AgentDispatcher, AutoApproveProposal, ConversationLogger, GatewayDispatcher,
    NoConversationLogger, NoProgress, ProposalReviewPort, RunWorkflowInput, RunWorkflowUseCase,
    WorkflowProgress,
};
use triad_domain::{Model, OutputFormat, UserRequest};
use triad_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway,
};
use triad_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, StdinProposalReview,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let warnings = config.check()?;

    let _log_guard = init_logging(cli.verbose, config.logging.dir_path());

    for issue in &warnings {
        warn!("{}", issue.message);
        eprintln!("warning: {}", issue.message);
    }

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    info!("Starting triad");

    // === Dependency Injection ===
    let model = match cli.model.as_deref() {
        Some(name) => Model::new(name),
        None => config.provider.parse_model().0,
    };
    let behavior = config.behavior();

    let gateway = Arc::new(
        OpenAiGateway::from_file_config(&config.provider)
            .context("Failed to initialize the completion provider")?,
    );
    let conversation_logger = conversation_logger(&config);

    if cli.chat {
        let progress: Arc<dyn WorkflowProgress> = if config.repl.show_progress {
            Arc::new(ProgressReporter::new())
        } else {
            Arc::new(SimpleProgress)
        };
        let dispatcher: Arc<dyn AgentDispatcher> = Arc::new(
            GatewayDispatcher::new(gateway, model)
                .with_behavior(behavior.clone())
                .with_progress(progress.clone()),
        );

        let mut repl = ChatRepl::new(behavior, dispatcher)
            .with_progress(progress)
            .with_conversation_logger(conversation_logger)
            .with_history_file(config.repl.history_path());
        repl.run().await?;
        return Ok(());
    }

    let Some(request) = cli.request.as_deref() else {
        bail!("Please provide a request, or use --chat for interactive mode");
    };
    let request = UserRequest::try_new(request)?;

    let format = config.output.resolve_format(cli.output.map(Into::into));

    let progress: Arc<dyn WorkflowProgress> = if cli.quiet {
        Arc::new(NoProgress)
    } else if config.repl.show_progress {
        Arc::new(ProgressReporter::new().with_turns(format == OutputFormat::Summary))
    } else {
        Arc::new(SimpleProgress)
    };

    // Ctrl-C turns every remaining dispatch into the fallback reply,
    // which drives the workflow to its forced summary.
    let cancellation = CancellationToken::new();
    {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; finishing the workflow without further model calls");
                cancellation.cancel();
            }
        });
    }

    let dispatcher: Arc<dyn AgentDispatcher> = Arc::new(
        GatewayDispatcher::new(gateway, model)
            .with_behavior(behavior.clone())
            .with_progress(progress.clone())
            .with_cancellation(cancellation),
    );
    let reviewer: Arc<dyn ProposalReviewPort> = if cli.yes {
        Arc::new(AutoApproveProposal)
    } else {
        Arc::new(StdinProposalReview::new())
    };

    let use_case =
        RunWorkflowUseCase::new(dispatcher, reviewer).with_conversation_logger(conversation_logger);

    if !cli.quiet {
        eprintln!();
        eprintln!("Request: {}", request.content());
        eprintln!();
    }

    let output = use_case
        .execute(RunWorkflowInput::new(request, behavior), progress)
        .await?;

    println!("{}", ConsoleFormatter::format(&output, format));

    Ok(())
}

/// Console logging filtered by `-v` (or `RUST_LOG` when set), plus a daily
/// rolling file when `[logging] dir` is configured.
fn init_logging(verbose: u8, log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "triad.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    match config
        .logging
        .conversation_log_path()
        .and_then(JsonlConversationLogger::new)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}
