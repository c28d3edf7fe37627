//! Terminal settings from TOML (`[output]` and `[repl]` sections)
//!
//! ```toml
//! [output]
//! format = "full"   # full | summary | json
//! color = false
//!
//! [repl]
//! show_progress = true
//! history_file = "~/.local/share/triad/history.txt"
//! ```

use super::logging::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use triad_domain::OutputFormat;

/// How one-shot results are printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Fallback when `--output` is not given
    pub format: Option<OutputFormat>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// `--output` wins over the file, the file over the built-in default
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }
}

/// Chat mode and live progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Spinner while a role is responding; plain lines otherwise
    pub show_progress: bool,
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl FileReplConfig {
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.as_deref().map(expand_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_format_precedence() {
        let config: FileConfig = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.resolve_format(None), OutputFormat::Json);
        assert_eq!(
            config.output.resolve_format(Some(OutputFormat::Full)),
            OutputFormat::Full
        );
        assert_eq!(
            FileOutputConfig::default().resolve_format(None),
            OutputFormat::Summary
        );
    }

    #[test]
    fn test_history_path() {
        let config: FileConfig =
            toml::from_str("[repl]\nhistory_file = \"/tmp/triad-history\"\n").unwrap();
        assert!(config.repl.show_progress);
        assert_eq!(
            config.repl.history_path(),
            Some(PathBuf::from("/tmp/triad-history"))
        );
        assert!(FileReplConfig::default().history_path().is_none());
    }
}
