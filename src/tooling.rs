//! Tooling & Integration Layer
//!
//! Command-line surface over the agent catalog and the install service: argument
//! parsing, terminal prompts and text/JSON rendering.

pub mod cli;
pub mod format;
pub mod prompt;

pub use cli::{Cli, CliContext, CommandOutput, Commands};
