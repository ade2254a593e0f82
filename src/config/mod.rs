//! Configuration
//!
//! Layered configuration for the CLI: built-in defaults, the global config file,
//! the workspace config file, and `CLAUDE_AGENTS__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::install::InstallTarget;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application name used for config and state directories.
pub const APP_NAME: &str = "claude-agents";

/// Workspace config file name, looked up in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = ".claude-agents.toml";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Install target defaults and directory overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Target used when neither `--global` nor `--local` is given
    #[serde(default)]
    pub default_target: InstallTarget,

    /// Replaces `~/.claude/agents`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_dir: Option<PathBuf>,

    /// Replaces `<workspace>/.claude/agents`; relative paths are workspace-relative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<PathBuf>,
}

/// Where agent definitions are read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Read `*.md` agents from this directory instead of the bundled set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}
