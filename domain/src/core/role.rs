//! Role value object for the three workflow participants

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the three fixed negotiation participants (Value Object)
///
/// The set is closed: roles are never created or removed at runtime, and each
/// variant carries its own display name, description, instruction text and
/// icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owns the product vision and the final review
    Requirements,
    /// Designs and writes the code
    Builder,
    /// Tests the code and reports problems
    Verifier,
}

impl Role {
    /// All roles, in workflow order
    pub const ALL: [Role; 3] = [Role::Requirements, Role::Builder, Role::Verifier];

    /// Short machine-friendly key
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Requirements => "requirements",
            Role::Builder => "builder",
            Role::Verifier => "verifier",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Requirements => "Product Manager",
            Role::Builder => "Software Engineer",
            Role::Verifier => "Test Engineer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Requirements => {
                "Responsible for understanding requirements, defining product vision, and ensuring business value"
            }
            Role::Builder => {
                "Responsible for technical design, architecture, and implementation details"
            }
            Role::Verifier => "Responsible for testing strategy, quality assurance, and validation",
        }
    }

    /// System instruction text sent ahead of every prompt for this role
    pub fn instructions(&self) -> &'static str {
        match self {
            Role::Requirements => {
                r#"You are a Product Manager. Your role is to:
1. Understand and clarify user requirements
2. Define product vision and goals
3. Prioritize features based on business value
4. Ensure the solution meets user needs
5. Review final products and provide feedback

Always think from a business and user perspective. Be specific about requirements and success criteria."#
            }
            Role::Builder => {
                r#"You are a Software Engineer. Your role is to:
1. Design technical architecture and solutions
2. Consider scalability, performance, and maintainability
3. Suggest appropriate technologies and frameworks
4. Write clean, production-ready code
5. Respond to feedback and iterate on code

Think from a technical perspective. Write complete, runnable code with proper error handling."#
            }
            Role::Verifier => {
                r#"You are a Test Engineer. Your role is to:
1. Design comprehensive testing strategies
2. Identify potential issues and edge cases
3. Ensure quality and reliability
4. Validate that requirements are met
5. Provide specific feedback for improvements

Think from a quality assurance perspective. Be thorough in testing and provide actionable feedback."#
            }
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Role::Requirements => "💡",
            Role::Builder => "💻",
            Role::Verifier => "🧪",
        }
    }

    /// Marker that prefixes this role's turns when rendered (e.g. `**Test Engineer**:`)
    pub fn tag(&self) -> String {
        format!("**{}**:", self.display_name())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == needle || role.display_name().to_lowercase() == needle)
            .ok_or_else(|| DomainError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("builder".parse::<Role>().unwrap(), Role::Builder);
        assert_eq!("test engineer".parse::<Role>().unwrap(), Role::Verifier);
        assert_eq!(
            "Product Manager".parse::<Role>().unwrap(),
            Role::Requirements
        );
        assert!(matches!(
            "designer".parse::<Role>(),
            Err(DomainError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_role_tag() {
        assert_eq!(Role::Verifier.tag(), "**Test Engineer**:");
    }

    #[test]
    fn test_roles_are_distinct() {
        let names: std::collections::HashSet<_> =
            Role::ALL.iter().map(|r| r.display_name()).collect();
        assert_eq!(names.len(), 3);
        assert!(Role::ALL.iter().all(|r| !r.instructions().is_empty()));
    }
}
