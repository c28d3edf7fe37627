//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where logs go besides stderr
///
/// # Example
///
/// ```toml
/// [logging]
/// conversation_log = "~/.local/share/triad/conversation.jsonl"
/// dir = "~/.local/state/triad/logs"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every workflow event
    pub conversation_log: Option<String>,
    /// Directory for rolling tracing output
    pub dir: Option<String>,
}

impl FileLoggingConfig {
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.conversation_log.as_deref().map(expand_home)
    }

    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
