//! Workflow session
//!
//! Drives one [`WorkflowState`] through the [`WorkflowMachine`]: feeds user
//! messages in, performs every dispatch the machine asks for, and feeds the
//! responses back until the machine waits for the user or finishes.
//!
//! Exactly one dispatch is outstanding at a time, and `&mut self` on
//! [`start`](WorkflowSession::start) / [`submit`](WorkflowSession::submit)
//! keeps callers from interleaving turns.

use crate::ports::agent_dispatcher::AgentDispatcher;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, WorkflowProgress};
use crate::use_cases::run_workflow::RunWorkflowError;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triad_domain::{
    COMPLETION_NOTICE, FinalSummary, Input, Next, Phase, PromptTemplate, Role, Task, Transcript,
    UserRequest, WorkflowMachine, WorkflowState, truncate,
};

/// Where a session stopped after processing one user message
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The user is asked to approve or revise the proposal
    AwaitingUser,
    /// The message was recorded; nothing is pending
    Idle,
    /// The workflow finished during this call
    Finished(FinalSummary),
    /// The workflow had already finished; carries the completion notice
    Closed(&'static str),
}

/// One workflow session
pub struct WorkflowSession {
    machine: WorkflowMachine,
    state: WorkflowState,
    dispatcher: Arc<dyn AgentDispatcher>,
    progress: Arc<dyn WorkflowProgress>,
    conversation_logger: Arc<dyn ConversationLogger>,
    dispatch_count: usize,
}

impl WorkflowSession {
    pub fn new(machine: WorkflowMachine, dispatcher: Arc<dyn AgentDispatcher>) -> Self {
        let state = machine.initial_state();
        Self {
            machine,
            state,
            dispatcher,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
            dispatch_count: 0,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn WorkflowProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of times the dispatcher has been called
    pub fn dispatch_count(&self) -> usize {
        self.dispatch_count
    }

    /// Introduction shown before the first request
    pub fn welcome(&self) -> String {
        PromptTemplate::welcome(&self.machine.policy().limits)
    }

    /// Begin the workflow with the user's product request.
    pub async fn start(&mut self, request: UserRequest) -> Result<SessionOutcome, RunWorkflowError> {
        if self.state.phase() != Phase::Initial {
            return Err(RunWorkflowError::AlreadyStarted(self.state.phase()));
        }
        info!("Starting workflow: {}", truncate(request.content(), 100));
        self.drive(Input::UserMessage(request.into_content())).await
    }

    /// Send any user message.
    ///
    /// Bootstraps the workflow when nothing was started yet. After the
    /// workflow finished, returns the completion notice and changes nothing.
    pub async fn submit(&mut self, message: &str) -> Result<SessionOutcome, RunWorkflowError> {
        if self.state.is_finished() {
            debug!("Rejecting message after finish");
            self.conversation_logger.log(ConversationEvent::new(
                "rejected_after_finish",
                json!({ "message": message }),
            ));
            return Ok(SessionOutcome::Closed(COMPLETION_NOTICE));
        }
        if message.trim().is_empty() {
            return Err(RunWorkflowError::EmptyMessage);
        }
        if self.state.phase() == Phase::Initial {
            let request = UserRequest::try_new(message)?;
            return self.start(request).await;
        }
        self.drive(Input::UserMessage(message.to_string())).await
    }

    async fn drive(&mut self, first: Input) -> Result<SessionOutcome, RunWorkflowError> {
        let mut input = first;
        loop {
            let from = self.state.phase();
            let seen = self.state.transcript().len();

            let state = std::mem::take(&mut self.state);
            let transition = self.machine.step(state, input);
            self.state = transition.state;

            self.report_new_turns(seen);
            let to = self.state.phase();
            if from != to {
                info!(from = %from, to = %to, "Phase transition");
                self.progress.on_transition(from, to);
                self.conversation_logger.log(ConversationEvent::new(
                    "transition",
                    json!({
                        "from": from.as_str(),
                        "to": to.as_str(),
                        "iteration": self.state.iteration_count(),
                    }),
                ));
            }

            match transition.next {
                Next::Dispatch { role, task } => {
                    let text = self.dispatch(role, task).await;
                    input = Input::RoleResponse { role, text };
                }
                Next::AwaitUser => return Ok(SessionOutcome::AwaitingUser),
                Next::Idle => {
                    debug!(phase = %to, "No transition for input");
                    return Ok(SessionOutcome::Idle);
                }
                Next::Finished(summary) => {
                    info!(
                        iterations = summary.iterations,
                        forced = summary.forced,
                        "Workflow finished"
                    );
                    self.progress.on_finished(&summary);
                    self.conversation_logger.log(ConversationEvent::new(
                        "finalized",
                        json!({
                            "iterations": summary.iterations,
                            "forced": summary.forced,
                            "round_limit_reached": summary.round_limit_reached,
                            "artifact_len": summary.artifact.len(),
                        }),
                    ));
                    return Ok(SessionOutcome::Finished(summary));
                }
                Next::Closed => return Ok(SessionOutcome::Closed(COMPLETION_NOTICE)),
            }
        }
    }

    /// The only place the dispatcher is called
    async fn dispatch(&mut self, role: Role, task: Task) -> String {
        if self.state.is_finished() {
            warn!(role = %role, "Dispatch requested after finish, ignoring");
            return COMPLETION_NOTICE.to_string();
        }

        let prompt = PromptTemplate::render(role, task, &self.state);
        info!(role = %role, task = %task, phase = %self.state.phase(), "Dispatching role");
        self.progress.on_dispatch(role, task);
        self.conversation_logger.log(ConversationEvent::new(
            "dispatch",
            json!({
                "role": role.as_str(),
                "task": task.as_str(),
                "phase": self.state.phase().as_str(),
                "prompt_len": prompt.len(),
            }),
        ));

        self.dispatch_count += 1;
        let text = self.dispatcher.send_role_prompt(role, &prompt).await;
        self.progress.on_response(role, &text);
        text
    }

    fn report_new_turns(&self, seen: usize) {
        for turn in &self.state.transcript().turns()[seen..] {
            self.progress.on_turn(turn);
            self.conversation_logger.log(ConversationEvent::new(
                "turn",
                json!({
                    "author": turn.author.display_name(),
                    "content": turn.content,
                    "timestamp": turn.timestamp.to_rfc3339(),
                }),
            ));
        }
    }
}
