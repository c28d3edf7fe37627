//! Transcript entities: turns and their authors

use crate::core::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "role")]
pub enum Author {
    User,
    Role(Role),
    /// Workflow notices (round limits, consensus checks, final summary)
    System,
}

impl Author {
    pub fn role(&self) -> Option<Role> {
        match self {
            Author::Role(role) => Some(*role),
            Author::User | Author::System => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Author::User => "User",
            Author::Role(role) => role.display_name(),
            Author::System => "System",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One authored message in the transcript (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(author: Author, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content)
    }

    pub fn role(role: Role, content: impl Into<String>) -> Self {
        Self::new(Author::Role(role), content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Author::System, content)
    }

    /// The turn as it appears in the conversation (`**Name**: content`)
    pub fn rendered(&self) -> String {
        format!("**{}**: {}", self.author.display_name(), self.content)
    }

    /// Whether this turn speaks for `role`: authored by it, or carrying its tag.
    pub fn names_role(&self, role: Role) -> bool {
        self.author == Author::Role(role) || self.content.contains(&role.tag())
    }
}

/// Append-only, ordered record of the negotiation
///
/// Only the workflow state machine appends; readers get a shared slice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `n` turns (fewer if the transcript is shorter)
    pub fn recent(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_turns() {
        assert_eq!(Turn::user("hi").rendered(), "**User**: hi");
        assert_eq!(
            Turn::role(Role::Builder, "code").rendered(),
            "**Software Engineer**: code"
        );
        assert_eq!(Turn::system("note").rendered(), "**System**: note");
    }

    #[test]
    fn test_names_role() {
        let authored = Turn::role(Role::Verifier, "I agree");
        assert!(authored.names_role(Role::Verifier));
        assert!(!authored.names_role(Role::Builder));

        let quoted = Turn::system("**Product Manager**: I agree with the plan");
        assert!(quoted.names_role(Role::Requirements));
    }

    #[test]
    fn test_recent_window() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.push(Turn::user(format!("msg {i}")));
        }
        let recent = transcript.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "msg 3");
        assert_eq!(transcript.recent(10).len(), 5);
        assert_eq!(transcript.last().map(|t| t.content.as_str()), Some("msg 4"));
    }

    #[test]
    fn test_author_serde() {
        let json = serde_json::to_string(&Author::Role(Role::Builder)).unwrap();
        assert_eq!(json, r#"{"kind":"role","role":"builder"}"#);
        let user: Author = serde_json::from_str(r#"{"kind":"user"}"#).unwrap();
        assert_eq!(user, Author::User);
    }
}
