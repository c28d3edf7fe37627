//! Configuration file loading for triad
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./triad.toml` or `./.triad.toml`
//! 3. Global: `$XDG_CONFIG_HOME/triad/config.toml` (falls back to `~/.config`)
//! 4. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    FileClassifierConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
    FileReplConfig, FileWorkflowConfig,
};
pub use file_config::expand_home;
pub use issue::{ConfigIssue, ConfigIssueCode, ConfigValidationError, Severity};
pub use loader::ConfigLoader;
