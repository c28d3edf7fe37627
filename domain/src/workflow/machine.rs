//! Workflow State Machine
//!
//! A pure transition function over an owned [`WorkflowState`]. Every call to
//! [`WorkflowMachine::step`] consumes the state and one input (a user message
//! or a role's response), records the input in the transcript, consults the
//! consensus classifier and the round governor, and returns the successor
//! state together with what the caller must do next.
//!
//! The machine never talks to a completion service. It only *asks* for a
//! dispatch through [`Next::Dispatch`]; the caller performs it and feeds the
//! response back in.
//!
//! | Phase | Author | Guard | Next |
//! |-------|--------|-------|------|
//! | Initial | user | | Requirements proposes → AwaitingUserConfirmation |
//! | AwaitingUserConfirmation | user | approval | Requirements writes spec → Requirements |
//! | AwaitingUserConfirmation | user | no approval | Requirements revises (stay) |
//! | Requirements | Requirements | | Builder asks questions → Development |
//! | Development | Builder | budget left, no code | Builder continues (stay) |
//! | Development | Builder | budget spent or code | Verifier tests → Testing |
//! | Testing | Verifier | budget left | Builder addresses feedback → Review |
//! | Testing | Verifier | budget spent | Requirements reviews → Complete |
//! | Testing | Builder | | Verifier continues (stay) |
//! | Review | Builder | agreement | Requirements reviews → Complete |
//! | Review | Builder | no agreement | Verifier continues → Testing |
//! | Complete | Requirements | total review spent | finalize (forced) |
//! | Complete | Requirements | satisfied, all agreed | finalize |
//! | Complete | Requirements | satisfied only | Verifier confirms (stay) |
//! | Complete | Requirements | not satisfied | Builder, new iteration → Development |
//! | Complete | Verifier | agreement | finalize |
//! | Complete | Verifier | no agreement | Builder addresses feedback → Testing |
//!
//! Guards read the governor *before* the counter of the current turn is
//! bumped. Once finished, every input is answered with [`Next::Closed`] and
//! the state is returned untouched.

use super::phase::Phase;
use super::state::{WorkflowPolicy, WorkflowState};
use super::summary::FinalSummary;
use super::task::Task;
use super::turn::Turn;
use crate::artifact::{PLACEHOLDER_ARTIFACT, extract_code};
use crate::consensus::ConsensusClassifier;
use crate::core::role::Role;

/// Reply to any input after the workflow finished
pub const COMPLETION_NOTICE: &str = "This workflow has been completed. No further development is needed as all agents have reached consensus.";

/// One input to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    UserMessage(String),
    RoleResponse { role: Role, text: String },
}

/// What the caller must do after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    /// Prompt `role` with `task` and feed its response back in
    Dispatch { role: Role, task: Task },
    /// Nothing to dispatch until the user replies
    AwaitUser,
    /// Input recorded, no transition applies
    Idle,
    /// The workflow just finished
    Finished(FinalSummary),
    /// The workflow had already finished; the input was rejected
    Closed,
}

impl Next {
    pub fn dispatch(&self) -> Option<(Role, Task)> {
        match self {
            Next::Dispatch { role, task } => Some((*role, *task)),
            _ => None,
        }
    }
}

/// Result of one step
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WorkflowState,
    pub next: Next,
}

impl Transition {
    fn dispatch(state: WorkflowState, role: Role, task: Task) -> Self {
        Self {
            state,
            next: Next::Dispatch { role, task },
        }
    }

    fn with(state: WorkflowState, next: Next) -> Self {
        Self { state, next }
    }
}

/// Decides phase transitions from classifier signals and governor state
#[derive(Debug, Clone, Default)]
pub struct WorkflowMachine {
    classifier: ConsensusClassifier,
    policy: WorkflowPolicy,
}

impl WorkflowMachine {
    pub fn new(classifier: ConsensusClassifier, policy: WorkflowPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn classifier(&self) -> &ConsensusClassifier {
        &self.classifier
    }

    pub fn policy(&self) -> &WorkflowPolicy {
        &self.policy
    }

    /// A fresh state in the Initial phase, using this machine's limits
    pub fn initial_state(&self) -> WorkflowState {
        WorkflowState::new(self.policy.limits)
    }

    /// Size of the recent-turn window used by the all-roles-agreed check
    pub fn consensus_window(&self) -> usize {
        self.policy.recent_window_per_role * Role::ALL.len()
    }

    pub fn user_message(&self, state: WorkflowState, text: impl Into<String>) -> Transition {
        self.step(state, Input::UserMessage(text.into()))
    }

    pub fn role_response(
        &self,
        state: WorkflowState,
        role: Role,
        text: impl Into<String>,
    ) -> Transition {
        self.step(
            state,
            Input::RoleResponse {
                role,
                text: text.into(),
            },
        )
    }

    /// Apply one input
    pub fn step(&self, state: WorkflowState, input: Input) -> Transition {
        if state.finished {
            return Transition::with(state, Next::Closed);
        }
        match input {
            Input::UserMessage(text) => self.on_user(state, text),
            Input::RoleResponse { role, text } => self.on_role(state, role, text),
        }
    }

    fn on_user(&self, mut state: WorkflowState, text: String) -> Transition {
        let approved = self.classifier.signals_approval(&text);
        let addressed = addressed_role(&text);
        state.record(Turn::user(text));

        match state.phase {
            Phase::Initial => {
                state.enter(Phase::AwaitingUserConfirmation);
                Transition::dispatch(state, Role::Requirements, Task::ProposeDesign)
            }
            Phase::AwaitingUserConfirmation if approved => {
                state.record(Turn::system(format!(
                    "Thank you for confirming. The {} will now write a detailed specification for the technical team.",
                    Role::Requirements.display_name()
                )));
                state.enter(Phase::Requirements);
                Transition::dispatch(state, Role::Requirements, Task::WriteSpecification)
            }
            Phase::AwaitingUserConfirmation => {
                state.record(Turn::system(format!(
                    "The {} will revise the proposal based on your feedback.",
                    Role::Requirements.display_name()
                )));
                Transition::dispatch(state, Role::Requirements, Task::ReviseProposal)
            }
            phase => {
                if let Some(role) = addressed {
                    return Transition::dispatch(state, role, Task::DirectQuestion);
                }
                state.record(Turn::system(
                    "I'll incorporate your feedback into the current development phase.",
                ));
                match phase.expected_role() {
                    Some(role) => Transition::dispatch(state, role, Task::DirectQuestion),
                    None => Transition::with(state, Next::Idle),
                }
            }
        }
    }

    fn on_role(&self, mut state: WorkflowState, role: Role, text: String) -> Transition {
        let code = extract_code(&text);
        state.record(Turn::role(role, text));

        match (state.phase, role) {
            (Phase::AwaitingUserConfirmation, Role::Requirements) => {
                state.record(Turn::system(
                    "Please review the proposal above. Reply \"I agree with your proposal\" to continue, or describe the changes you would like.",
                ));
                Transition::with(state, Next::AwaitUser)
            }
            (Phase::Requirements, Role::Requirements) => {
                state.enter(Phase::Development);
                Transition::dispatch(state, Role::Builder, Task::AskClarifyingQuestions)
            }
            (Phase::Development, Role::Builder) => self.on_development(state, code),
            (Phase::Testing, Role::Verifier) => self.on_testing(state),
            (Phase::Testing, Role::Builder) => {
                if !code.is_empty() {
                    state.artifact = code;
                }
                Transition::dispatch(state, Role::Verifier, Task::ContinueTesting)
            }
            (Phase::Review, Role::Builder) => self.on_review(state, code),
            (Phase::Complete, Role::Requirements) => self.on_final_review(state),
            (Phase::Complete, Role::Verifier) => self.on_final_confirmation(state),
            _ => Transition::with(state, Next::Idle),
        }
    }

    fn on_development(&self, mut state: WorkflowState, code: String) -> Transition {
        let counter = &mut state.governor.requirements_builder;
        if !counter.is_exhausted() && code.is_empty() {
            counter.increment();
            let task = if counter.is_exhausted() {
                Task::ForceCode
            } else {
                Task::ContinueDiscussion
            };
            return Transition::dispatch(state, Role::Builder, task);
        }

        if counter.is_exhausted() {
            let cap = counter.cap();
            state.record(Turn::system(format!(
                "Maximum of {} rounds reached for {} and {} discussion. Moving to testing phase with current code.",
                cap,
                Role::Requirements.display_name(),
                Role::Builder.display_name()
            )));
        }
        state.artifact = if code.is_empty() {
            PLACEHOLDER_ARTIFACT.to_string()
        } else {
            code
        };
        state.governor.builder_verifier.reset();
        state.enter(Phase::Testing);
        Transition::dispatch(state, Role::Verifier, Task::TestCode)
    }

    fn on_testing(&self, mut state: WorkflowState) -> Transition {
        let counter = &mut state.governor.builder_verifier;
        if !counter.is_exhausted() {
            counter.increment();
            state.enter(Phase::Review);
            return Transition::dispatch(state, Role::Builder, Task::AddressFeedback);
        }

        let cap = counter.cap();
        state.record(Turn::system(format!(
            "Maximum of {} rounds reached for {} and {} discussion. Moving to final review.",
            cap,
            Role::Builder.display_name(),
            Role::Verifier.display_name()
        )));
        state.enter(Phase::Complete);
        Transition::dispatch(state, Role::Requirements, Task::FinalReview)
    }

    fn on_review(&self, mut state: WorkflowState, code: String) -> Transition {
        if self.last_agrees(&state) {
            if !code.is_empty() {
                state.artifact = code;
            }
            state.enter(Phase::Complete);
            Transition::dispatch(state, Role::Requirements, Task::FinalReview)
        } else {
            state.enter(Phase::Testing);
            Transition::dispatch(state, Role::Verifier, Task::ContinueTesting)
        }
    }

    fn on_final_review(&self, mut state: WorkflowState) -> Transition {
        if state.governor.total_review.is_exhausted() {
            state.record(Turn::system(format!(
                "Maximum of {} rounds reached for {} review across all iterations. Finalizing product based on current consensus.",
                state.governor.total_review.cap(),
                Role::Requirements.display_name()
            )));
            return self.finalize(state, true);
        }

        state.governor.review.increment();
        state.governor.total_review.increment();

        let satisfied = state
            .transcript
            .last()
            .is_some_and(|turn| self.classifier.classify_satisfaction(&turn.content));
        if satisfied {
            let window = state.transcript.recent(self.consensus_window());
            if self.classifier.all_roles_agreed(window, &Role::ALL) {
                return self.finalize(state, false);
            }
            state.record(Turn::system(format!(
                "**Consensus Check**\n\n{} has approved the product. Waiting for final confirmation from all team members...",
                Role::Requirements.display_name()
            )));
            return Transition::dispatch(state, Role::Verifier, Task::FinalConfirmation);
        }

        state.iteration_count += 1;
        state.governor.reset_iteration();
        state.enter(Phase::Development);
        Transition::dispatch(state, Role::Builder, Task::NewIteration)
    }

    fn on_final_confirmation(&self, mut state: WorkflowState) -> Transition {
        if self.last_agrees(&state) {
            return self.finalize(state, false);
        }
        state.enter(Phase::Testing);
        Transition::dispatch(state, Role::Builder, Task::AddressFeedback)
    }

    fn last_agrees(&self, state: &WorkflowState) -> bool {
        state
            .transcript
            .last()
            .is_some_and(|turn| self.classifier.classify_agreement(&turn.content))
    }

    fn finalize(&self, mut state: WorkflowState, forced: bool) -> Transition {
        let summary = FinalSummary::new(
            state.iteration_count,
            &state.governor,
            &state.artifact,
            forced,
        );
        state.record(Turn::system(summary.render()));
        state.finished = true;
        state.enter(Phase::Finished);
        Transition::with(state, Next::Finished(summary))
    }
}

/// The role a mid-workflow user message speaks to, by display name
fn addressed_role(text: &str) -> Option<Role> {
    let text = text.to_lowercase();
    Role::ALL
        .into_iter()
        .find(|role| text.contains(&role.display_name().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::governor::RoundLimits;
    use crate::workflow::turn::Author;

    const CODE: &str = "Here is the implementation:\n```js\nfunction add(a, b) { return a + b; }\n```";

    fn expect_dispatch(t: &Transition, role: Role, task: Task) {
        assert_eq!(
            t.next,
            Next::Dispatch { role, task },
            "phase {:?}",
            t.state.phase()
        );
    }

    /// Drive a fresh state up to the Development phase
    fn into_development(machine: &WorkflowMachine) -> WorkflowState {
        let t = machine.user_message(machine.initial_state(), "Build a calculator");
        let t = machine.role_response(t.state, Role::Requirements, "Proposal: a calculator");
        let t = machine.user_message(t.state, "I agree with your proposal");
        let t = machine.role_response(t.state, Role::Requirements, "Specification: add numbers");
        assert_eq!(t.state.phase(), Phase::Development);
        t.state
    }

    /// Drive from Development to Complete along the shortest agreeing path
    fn development_to_complete(machine: &WorkflowMachine, state: WorkflowState) -> WorkflowState {
        let t = machine.role_response(state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "Tests pass, I approve this version");
        let t = machine.role_response(t.state, Role::Builder, "This looks good, ready for production");
        assert_eq!(t.state.phase(), Phase::Complete);
        t.state
    }

    #[test]
    fn test_happy_path() {
        let machine = WorkflowMachine::default();

        let t = machine.user_message(machine.initial_state(), "Build a todo app");
        assert_eq!(t.state.phase(), Phase::AwaitingUserConfirmation);
        expect_dispatch(&t, Role::Requirements, Task::ProposeDesign);

        let t = machine.role_response(t.state, Role::Requirements, "I propose a simple todo list app.");
        assert_eq!(t.next, Next::AwaitUser);

        let t = machine.user_message(t.state, "I agree");
        assert_eq!(t.state.phase(), Phase::Requirements);
        expect_dispatch(&t, Role::Requirements, Task::WriteSpecification);

        let t = machine.role_response(t.state, Role::Requirements, "Specification: tasks can be added and removed.");
        assert_eq!(t.state.phase(), Phase::Development);
        expect_dispatch(&t, Role::Builder, Task::AskClarifyingQuestions);

        let t = machine.role_response(t.state, Role::Builder, "Which storage should we use?");
        assert_eq!(t.state.phase(), Phase::Development);
        assert_eq!(t.state.governor().requirements_builder.count(), 1);
        expect_dispatch(&t, Role::Builder, Task::ContinueDiscussion);

        let t = machine.role_response(t.state, Role::Builder, CODE);
        assert_eq!(t.state.phase(), Phase::Testing);
        assert!(t.state.artifact().starts_with("```js"));
        expect_dispatch(&t, Role::Verifier, Task::TestCode);

        let t = machine.role_response(t.state, Role::Verifier, "I approve this version");
        assert_eq!(t.state.phase(), Phase::Review);
        expect_dispatch(&t, Role::Builder, Task::AddressFeedback);

        let t = machine.role_response(t.state, Role::Builder, "This looks good, ready for production");
        assert_eq!(t.state.phase(), Phase::Complete);
        expect_dispatch(&t, Role::Requirements, Task::FinalReview);

        let t = machine.role_response(t.state, Role::Requirements, "I approve this product for delivery");
        assert!(t.state.is_finished());
        assert_eq!(t.state.phase(), Phase::Finished);
        assert_eq!(t.state.iteration_count(), 1);
        match t.next {
            Next::Finished(summary) => {
                assert!(!summary.forced);
                assert_eq!(summary.iterations, 1);
                assert_eq!(summary.artifact, t.state.artifact());
            }
            other => panic!("expected Finished, got {other:?}"),
        }
        assert_eq!(t.state.transcript().last().map(|t| t.author), Some(Author::System));
    }

    #[test]
    fn test_user_change_request_revises_proposal() {
        let machine = WorkflowMachine::default();
        let t = machine.user_message(machine.initial_state(), "Build a chat app");
        let t = machine.role_response(t.state, Role::Requirements, "Proposal");
        let t = machine.user_message(t.state, "Please add dark mode");
        assert_eq!(t.state.phase(), Phase::AwaitingUserConfirmation);
        expect_dispatch(&t, Role::Requirements, Task::ReviseProposal);
    }

    #[test]
    fn test_development_forced_into_testing_with_placeholder() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);

        let t = machine.role_response(state, Role::Builder, "Question one?");
        expect_dispatch(&t, Role::Builder, Task::ContinueDiscussion);
        let t = machine.role_response(t.state, Role::Builder, "Question two?");
        expect_dispatch(&t, Role::Builder, Task::ForceCode);
        assert!(t.state.governor().requirements_builder.is_exhausted());

        let t = machine.role_response(t.state, Role::Builder, "Still thinking");
        assert_eq!(t.state.phase(), Phase::Testing);
        assert_eq!(t.state.artifact(), PLACEHOLDER_ARTIFACT);
        assert_eq!(t.state.governor().builder_verifier.count(), 0);
        expect_dispatch(&t, Role::Verifier, Task::TestCode);
    }

    #[test]
    fn test_testing_budget_skips_review() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);

        let t = machine.role_response(t.state, Role::Verifier, "Bug found");
        expect_dispatch(&t, Role::Builder, Task::AddressFeedback);
        let t = machine.role_response(t.state, Role::Builder, "I disagree, it works");
        assert_eq!(t.state.phase(), Phase::Testing);
        expect_dispatch(&t, Role::Verifier, Task::ContinueTesting);
        let t = machine.role_response(t.state, Role::Verifier, "Another bug");
        expect_dispatch(&t, Role::Builder, Task::AddressFeedback);
        let t = machine.role_response(t.state, Role::Builder, "Let me look again");
        let t = machine.role_response(t.state, Role::Verifier, "Still broken");

        assert_eq!(t.state.phase(), Phase::Complete);
        expect_dispatch(&t, Role::Requirements, Task::FinalReview);
    }

    #[test]
    fn test_review_updates_artifact_on_agreement() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "Rename the function");
        let t = machine.role_response(
            t.state,
            Role::Builder,
            "Agreed, ready for production:\n```js\nfunction sum(a, b) { return a + b; }\n```",
        );
        assert_eq!(t.state.phase(), Phase::Complete);
        assert!(t.state.artifact().contains("function sum"));
    }

    #[test]
    fn test_review_disagreement_keeps_artifact() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);
        let tested = t.state.artifact().to_string();
        let t = machine.role_response(t.state, Role::Verifier, "Found a bug in add");
        let t = machine.role_response(
            t.state,
            Role::Builder,
            "I disagree, trying another approach:\n```js\nexperimental()\n```",
        );
        assert_eq!(t.state.phase(), Phase::Testing);
        assert_eq!(t.state.artifact(), tested);
        expect_dispatch(&t, Role::Verifier, Task::ContinueTesting);
    }

    #[test]
    fn test_code_at_discussion_cap_keeps_real_code() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);

        let t = machine.role_response(state, Role::Builder, "Question one?");
        let t = machine.role_response(t.state, Role::Builder, "Question two?");
        assert!(t.state.governor().requirements_builder.is_exhausted());
        let before = t.state.transcript().len();

        let t = machine.role_response(t.state, Role::Builder, CODE);
        assert_eq!(t.state.phase(), Phase::Testing);
        assert!(t.state.artifact().contains("function add"));
        assert_ne!(t.state.artifact(), PLACEHOLDER_ARTIFACT);
        expect_dispatch(&t, Role::Verifier, Task::TestCode);

        let notices: Vec<_> = t.state.transcript().turns()[before..]
            .iter()
            .filter(|turn| turn.author == Author::System)
            .collect();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].content.contains("Maximum of 2 rounds reached"));
    }

    #[test]
    fn test_forced_finalize_on_third_review() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);

        let state = development_to_complete(&machine, state);
        let t = machine.role_response(state, Role::Requirements, "Please change the layout");
        assert_eq!(t.state.phase(), Phase::Development);
        assert_eq!(t.state.iteration_count(), 2);
        assert_eq!(t.state.governor().total_review.count(), 1);
        assert_eq!(t.state.governor().review.count(), 0);
        expect_dispatch(&t, Role::Builder, Task::NewIteration);

        let state = development_to_complete(&machine, t.state);
        let t = machine.role_response(state, Role::Requirements, "Modify the colors too");
        assert_eq!(t.state.iteration_count(), 3);
        assert!(t.state.governor().total_review.is_exhausted());

        let state = development_to_complete(&machine, t.state);
        let t = machine.role_response(state, Role::Requirements, "Change everything again");
        assert!(t.state.is_finished());
        match t.next {
            Next::Finished(summary) => {
                assert!(summary.forced);
                assert!(summary.round_limit_reached);
                assert_eq!(summary.iterations, 3);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }

    #[test]
    fn test_satisfied_without_consensus_asks_verifier() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "Found an off-by-one bug");
        let t = machine.role_response(t.state, Role::Builder, "This looks good, ready for production");
        let t = machine.role_response(t.state, Role::Requirements, "I approve this product for delivery");

        assert_eq!(t.state.phase(), Phase::Complete);
        expect_dispatch(&t, Role::Verifier, Task::FinalConfirmation);

        let t = machine.role_response(t.state, Role::Verifier, "Confirmed, ready for delivery");
        assert!(t.state.is_finished());
    }

    #[test]
    fn test_verifier_rejection_sends_builder_back_to_testing() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "Found a bug");
        let t = machine.role_response(t.state, Role::Builder, "This looks good, ready for production");
        let t = machine.role_response(t.state, Role::Requirements, "I approve this product for delivery");
        let t = machine.role_response(t.state, Role::Verifier, "There is still a crash on empty input");

        assert_eq!(t.state.phase(), Phase::Testing);
        expect_dispatch(&t, Role::Builder, Task::AddressFeedback);

        let t = machine.role_response(t.state, Role::Builder, "Fixed:\n```js\nfunction add(a = 0, b = 0) { return a + b; }\n```");
        assert_eq!(t.state.phase(), Phase::Testing);
        assert!(t.state.artifact().contains("a = 0"));
        expect_dispatch(&t, Role::Verifier, Task::ContinueTesting);
    }

    #[test]
    fn test_empty_responses_take_negative_branches() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);

        let t = machine.role_response(state, Role::Builder, "");
        expect_dispatch(&t, Role::Builder, Task::ContinueDiscussion);

        let state = development_to_complete(&machine, t.state);
        let t = machine.role_response(state, Role::Requirements, "");
        assert_eq!(t.state.phase(), Phase::Development);
        expect_dispatch(&t, Role::Builder, Task::NewIteration);

        let t = machine.role_response(t.state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "");
        let t = machine.role_response(t.state, Role::Builder, "");
        assert_eq!(t.state.phase(), Phase::Testing);
        expect_dispatch(&t, Role::Verifier, Task::ContinueTesting);
    }

    #[test]
    fn test_closed_after_finish() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let state = development_to_complete(&machine, state);
        let t = machine.role_response(state, Role::Requirements, "I approve this product for delivery");
        assert!(t.state.is_finished());

        let len = t.state.transcript().len();
        let artifact = t.state.artifact().to_string();

        let t = machine.user_message(t.state, "One more thing");
        assert_eq!(t.next, Next::Closed);
        let t = machine.role_response(t.state, Role::Builder, "late reply");
        assert_eq!(t.next, Next::Closed);

        assert_eq!(t.state.transcript().len(), len);
        assert_eq!(t.state.artifact(), artifact);
        assert_eq!(t.state.phase(), Phase::Finished);
    }

    #[test]
    fn test_unexpected_author_is_recorded_without_transition() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let len = state.transcript().len();

        let t = machine.role_response(state, Role::Verifier, "Hello from testing");
        assert_eq!(t.next, Next::Idle);
        assert_eq!(t.state.phase(), Phase::Development);
        assert_eq!(t.state.transcript().len(), len + 1);
    }

    #[test]
    fn test_mid_workflow_user_input() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);

        let t = machine.user_message(state, "Test Engineer, what will you check?");
        expect_dispatch(&t, Role::Verifier, Task::DirectQuestion);

        let t = machine.user_message(t.state, "Please keep it small");
        expect_dispatch(&t, Role::Builder, Task::DirectQuestion);
        assert_eq!(t.state.transcript().last().map(|t| t.author), Some(Author::System));
    }

    /// The all-roles check only sees the last `2 × roles` turns, so an
    /// agreement that scrolled out of the window is not counted.
    #[test]
    fn test_consensus_outside_window_is_missed() {
        let machine = WorkflowMachine::default();
        let state = into_development(&machine);
        let t = machine.role_response(state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "I approve this version");
        let t = machine.role_response(t.state, Role::Builder, "I disagree with one point, keeping the parser as is");
        let t = machine.user_message(t.state, "How is it going?");
        let t = machine.role_response(t.state, Role::Verifier, "Found one more bug in the parser");
        let t = machine.role_response(t.state, Role::Builder, "This looks good, ready for production");
        let t = machine.role_response(t.state, Role::Requirements, "I approve this product for delivery");

        let verifier_agreed_earlier = t
            .state
            .transcript()
            .iter()
            .any(|turn| turn.author == Author::Role(Role::Verifier) && machine.classifier().classify_agreement(&turn.content));
        assert!(verifier_agreed_earlier);
        expect_dispatch(&t, Role::Verifier, Task::FinalConfirmation);
    }

    #[test]
    fn test_custom_limits() {
        let policy = WorkflowPolicy::default().with_limits(RoundLimits {
            requirements_builder: 1,
            builder_verifier: 1,
            review: 1,
        });
        let machine = WorkflowMachine::new(ConsensusClassifier::default(), policy);
        let state = into_development(&machine);

        let t = machine.role_response(state, Role::Builder, "A question");
        expect_dispatch(&t, Role::Builder, Task::ForceCode);
        let t = machine.role_response(t.state, Role::Builder, CODE);
        let t = machine.role_response(t.state, Role::Verifier, "Bug");
        let t = machine.role_response(t.state, Role::Builder, "Hmm");
        let t = machine.role_response(t.state, Role::Verifier, "Bug again");
        assert_eq!(t.state.phase(), Phase::Complete);

        let t = machine.role_response(t.state, Role::Requirements, "Please change it");
        assert_eq!(t.state.phase(), Phase::Development);
        let state = development_to_complete(&machine, t.state);
        let t = machine.role_response(state, Role::Requirements, "Change it again");
        assert!(t.state.is_finished());
    }

    /// Tiny deterministic generator so adversarial runs are reproducible
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 33) as usize
        }
    }

    const RESPONSES: &[&str] = &[
        "",
        "I agree but this needs changes",
        "Not ready, still needs work",
        "This looks good, ready for production",
        "I approve this product for delivery",
        "Please change the design",
        "```py\nprint('hi')\n```",
        "I disagree ```\nbroken\n```",
        "```unterminated",
    ];

    #[test]
    fn test_every_sequence_terminates() {
        let machine = WorkflowMachine::default();

        for seed in 0..200 {
            let mut rng = Lcg(seed);
            let mut t = machine.user_message(machine.initial_state(), "Build something");
            let mut last_total = 0;
            let mut steps = 0;

            while !t.state.is_finished() {
                steps += 1;
                assert!(steps < 100, "seed {seed} did not terminate");

                t = match t.next {
                    Next::Dispatch { role, .. } => {
                        let text = RESPONSES[rng.next() % RESPONSES.len()];
                        machine.role_response(t.state, role, text)
                    }
                    Next::AwaitUser => machine.user_message(t.state, "yes"),
                    other => panic!("seed {seed}: unexpected {other:?} before finish"),
                };

                let total = t.state.governor().total_review.count();
                assert!(total >= last_total, "total review rounds decreased");
                last_total = total;
            }
        }
    }

    #[test]
    fn test_always_negative_responses_terminate() {
        let machine = WorkflowMachine::default();
        for text in ["", "I disagree, needs changes, not ready"] {
            let mut t = machine.user_message(machine.initial_state(), "Build something");
            let mut steps = 0;
            while !t.state.is_finished() {
                steps += 1;
                assert!(steps < 100);
                t = match t.next {
                    Next::Dispatch { role, .. } => machine.role_response(t.state, role, text),
                    Next::AwaitUser => machine.user_message(t.state, "go ahead"),
                    other => panic!("unexpected {other:?}"),
                };
            }
            assert!(matches!(t.next, Next::Finished(ref s) if s.forced));
        }
    }
}
