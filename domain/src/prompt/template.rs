//! Prompt templates for every workflow task

use crate::core::role::Role;
use crate::workflow::governor::RoundLimits;
use crate::workflow::state::WorkflowState;
use crate::workflow::task::Task;
use crate::workflow::turn::{Author, Transcript};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt body for `role` performing `task` on the current state.
    ///
    /// The role's standing instructions are not included; the dispatcher
    /// sends [`Role::instructions`] as the system prompt.
    pub fn render(role: Role, task: Task, state: &WorkflowState) -> String {
        let transcript = state.transcript();
        let caps = state.governor();
        let mut prompt = String::new();

        match task {
            Task::ProposeDesign => {
                prompt.push_str(&section("User Request", latest_user(transcript)));
            }
            Task::WriteSpecification => {
                prompt.push_str(&section("User Request", first_user(transcript)));
            }
            Task::DirectQuestion => {
                prompt.push_str(&Self::discussion(transcript));
                prompt.push_str(&format!(
                    "## Direct Question\n**User**: {}\n\n",
                    latest_user(transcript)
                ));
            }
            _ => prompt.push_str(&Self::discussion(transcript)),
        }

        match task {
            Task::ReviseProposal => {
                prompt.push_str(&section("User Feedback", latest_user(transcript)));
            }
            Task::TestCode => prompt.push_str(&code_section("Code to Test", state.artifact())),
            Task::FinalReview => prompt.push_str(&code_section("Final Code", state.artifact())),
            Task::AddressFeedback => prompt.push_str(&section(
                &format!("{} Feedback", Role::Verifier.display_name()),
                latest_from(transcript, Role::Verifier),
            )),
            Task::ContinueTesting => prompt.push_str(&section(
                &format!("{} Response", Role::Builder.display_name()),
                latest_from(transcript, Role::Builder),
            )),
            Task::NewIteration => prompt.push_str(&section(
                &format!("{} Feedback", Role::Requirements.display_name()),
                latest_from(transcript, Role::Requirements),
            )),
            _ => {}
        }

        let limits = RoundLimits {
            requirements_builder: caps.requirements_builder.cap(),
            builder_verifier: caps.builder_verifier.cap(),
            review: caps.total_review.cap(),
        };
        prompt.push_str(&Self::task_instructions(role, task, &limits));
        prompt
    }

    /// `## Previous Discussion` section, empty for an empty transcript
    pub fn discussion(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return String::new();
        }
        let body = transcript
            .iter()
            .map(|turn| match turn.author {
                Author::User => format!("**User**: {}", turn.content),
                Author::Role(_) | Author::System => format!("**Agent**: {}", turn.rendered()),
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        section("Previous Discussion", &body)
    }

    fn task_instructions(role: Role, task: Task, limits: &RoundLimits) -> String {
        let name = role.display_name();
        let body = match task {
            Task::ProposeDesign => format!(
                r#"As the {name}, analyze the user's request and propose a comprehensive product design. Include:

1. **Product Analysis**: What problem are we solving?
2. **Proposed Solution**: How will our product solve this problem?
3. **Key Features**: What are the main functionalities we should include?
4. **Target Users**: Who will use this product?
5. **Success Metrics**: How will we measure success?
6. **Technical Approach**: What technologies should we consider?
7. **Design Recommendations**: Any specific design suggestions?

Be thorough and provide a clear, actionable proposal that the user can review and approve."#
            ),
            Task::ReviseProposal => format!(
                "As the {name}, revise the product proposal based on the user's feedback. Address their concerns and provide an updated design that incorporates their suggestions. Be specific about what changes you're making and why."
            ),
            Task::WriteSpecification => format!(
                r#"As the {name}, provide a comprehensive description of the product based on the user's request. Include:

1. **Product Vision**: What problem does this solve?
2. **Key Features**: What are the main functionalities?
3. **Target Users**: Who will use this product?
4. **Success Criteria**: How will we measure success?
5. **Technical Requirements**: Any specific technical constraints?

Be detailed and specific so the {} can understand exactly what to build."#,
                Role::Builder.display_name()
            ),
            Task::AskClarifyingQuestions => format!(
                r#"As the {name}, review the {}'s description and ask clarifying questions to ensure you understand the requirements completely. Focus on:

1. **Technical feasibility**: Are there any technical challenges?
2. **Architecture decisions**: What technologies should we use?
3. **Implementation details**: What specific features need clarification?
4. **Scalability concerns**: How should we handle growth?
5. **Performance requirements**: Any specific performance needs?

Ask specific, actionable questions that will help you write the best possible code."#,
                Role::Requirements.display_name()
            ),
            Task::ContinueDiscussion => format!(
                r#"Based on the ongoing discussion, either:

1. **Ask more clarifying questions** if requirements are still unclear
2. **Start writing code** if you have enough information

**IMPORTANT**: You must finish this phase within {} rounds. If you cannot reach agreement, you must provide code based on the current understanding.

If you're ready to write code, provide a complete, runnable implementation with proper error handling and documentation. Use code blocks (```) to format your code."#,
                limits.requirements_builder
            ),
            Task::ForceCode => format!(
                r#"You have reached the maximum of {} rounds for requirements discussion. You must now provide the final code based on the current understanding of the requirements.

Provide a complete, runnable implementation with proper error handling and documentation. Use code blocks (```) to format your code."#,
                limits.requirements_builder
            ),
            Task::TestCode => format!(
                r#"As the {name}, thoroughly test this code and provide feedback. Consider:

1. **Functionality**: Does it work as intended?
2. **Edge cases**: What happens with invalid inputs?
3. **Error handling**: Are errors handled properly?
4. **Performance**: Any performance concerns?
5. **Security**: Any security vulnerabilities?
6. **Code quality**: Is the code maintainable?

Provide specific, actionable feedback. If you find issues, explain what needs to be fixed and why."#
            ),
            Task::AddressFeedback => format!(
                r#"As the {name}, respond to the {}'s feedback. Either:

1. **Address the issues** by providing updated code with fixes
2. **Explain why certain suggestions aren't applicable** if you disagree
3. **Ask for clarification** if the feedback is unclear

**IMPORTANT**: You must finish this phase within {} rounds. If you cannot reach agreement, you must provide the final code version.

If you're making changes, provide the complete updated code in code blocks (```). Be collaborative and professional in your response."#,
                Role::Verifier.display_name(),
                limits.builder_verifier
            ),
            Task::ContinueTesting => format!(
                r#"As the {name}, review the {}'s response and either:

1. **Approve the changes** if the issues are resolved - clearly state "I approve this version" or "This looks good to me"
2. **Provide additional feedback** if there are still concerns
3. **Suggest further improvements** if needed

**IMPORTANT**: You must finish this phase within {} rounds. If you cannot reach agreement, you must approve the current version or provide a final summary of remaining concerns.

Be specific about what you approve or what still needs work. If you're satisfied, use clear approval language to help the team reach consensus."#,
                Role::Builder.display_name(),
                limits.builder_verifier
            ),
            Task::FinalReview => format!(
                r#"As the {name}, review the final product that the {} and {} have agreed upon. Consider:

1. **Does it meet the original requirements?**
2. **Is it ready for users?**
3. **Are there any business concerns?**
4. **Should we make any final adjustments?**

Provide your final approval or specify what changes are needed. If you're satisfied, clearly state "I approve this product for delivery" or "This product is ready for users" to help the team reach final consensus."#,
                Role::Builder.display_name(),
                Role::Verifier.display_name()
            ),
            Task::FinalConfirmation => format!(
                r#"As the {name}, the {} has approved the product. Please provide your final confirmation:

1. **Confirm approval** if you're satisfied with the current version
2. **Voice any final concerns** if there are still issues that need to be addressed

Be clear about whether you approve the product for delivery or if there are any remaining concerns that should prevent the release."#,
                Role::Requirements.display_name()
            ),
            Task::NewIteration => format!(
                r#"As the {name}, the {} has requested changes. Please:

1. **Understand the requested changes**
2. **Implement the necessary modifications**
3. **Provide updated code** that addresses the feedback

Provide the complete updated code in code blocks (```). This will start a new testing cycle."#,
                Role::Requirements.display_name()
            ),
            Task::DirectQuestion => {
                return format!(
                    "## Your Response\nAs the {name}, respond directly to this question based on your expertise."
                );
            }
        };
        format!("## Your Task\n{body}")
    }

    /// Introduction shown before the first request
    pub fn welcome(limits: &RoundLimits) -> String {
        let mut out = String::from("**Multi-Agent Product Development Workflow**\n\n");
        out.push_str(
            "I'm here to help you develop a complete product with three specialized AI agents:\n\n",
        );
        for (i, role) in Role::ALL.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** {} - {}\n",
                i + 1,
                role.display_name(),
                role.icon(),
                role.description()
            ));
        }
        out.push_str(&format!(
            r#"
**Workflow:**
1. You describe your product idea
2. {pm} analyzes and proposes a design
3. You review and approve the proposal (or request changes)
4. {pm} works with {se} and {te}
5. Iterations continue until all agents agree
6. You get the final code and complete development history

**Round Limits:**
• {pm} & {se}: {} rounds
• {se} & {te}: {} rounds
• {pm} Review: {} rounds

Please describe your product idea to begin!"#,
            limits.requirements_builder,
            limits.builder_verifier,
            limits.review,
            pm = Role::Requirements.display_name(),
            se = Role::Builder.display_name(),
            te = Role::Verifier.display_name(),
        ));
        out
    }
}

fn section(title: &str, body: &str) -> String {
    format!("## {title}\n{body}\n\n")
}

fn code_section(title: &str, code: &str) -> String {
    if code.starts_with("```") {
        section(title, code)
    } else {
        section(title, &format!("```\n{code}\n```"))
    }
}

fn first_user(transcript: &Transcript) -> &str {
    transcript
        .iter()
        .find(|turn| turn.author == Author::User)
        .map(|turn| turn.content.as_str())
        .unwrap_or_default()
}

fn latest_user(transcript: &Transcript) -> &str {
    transcript
        .iter()
        .rev()
        .find(|turn| turn.author == Author::User)
        .map(|turn| turn.content.as_str())
        .unwrap_or_default()
}

fn latest_from(transcript: &Transcript, role: Role) -> &str {
    transcript
        .iter()
        .rev()
        .find(|turn| turn.author == Author::Role(role))
        .map(|turn| turn.content.as_str())
        .unwrap_or_default()
}
