//! Model value object naming the text-completion model

use serde::{Deserialize, Serialize};

/// Identifier of the completion model behind the dispatcher (Value Object)
///
/// The workflow never inspects the model; it is carried through to the
/// gateway so that sessions can be created against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new("gpt-4o")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Model::new(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse_and_display() {
        let model: Model = " gpt-4.1-mini ".parse().unwrap();
        assert_eq!(model.as_str(), "gpt-4.1-mini");
        assert_eq!(model.to_string(), "gpt-4.1-mini");
    }

    #[test]
    fn test_model_serde_transparent() {
        let json = serde_json::to_string(&Model::new("gpt-4o")).unwrap();
        assert_eq!(json, "\"gpt-4o\"");
    }
}
