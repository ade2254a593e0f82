//! claude-agents: Agent Catalog and Installer
//!
//! Parses a catalog of agent definitions (Markdown with a YAML header), answers
//! queries over it, and installs selected agents into the global
//! (`~/.claude/agents`) or project-local (`./.claude/agents`) agents directory.

pub mod agent;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod tooling;
