//! Agent Installation
//!
//! Writes selected agents into a global or project-local agents directory, with
//! overwrite, skip and interactive conflict handling.

mod commands;
pub mod resolver;
pub mod service;
pub mod target;

pub use commands::{AgentSelection, InstallCommandService};
pub use resolver::{Conflict, ConflictResolution, ConflictResolver, FixedResolver};
pub use service::{
    InstallOptions, InstallResult, InstallService, InstallStatus, InstallSummary, SkipReason,
    UninstallResult, UninstallStatus,
};
pub use target::{FixedTargetLocator, InstallTarget, StandardTargetLocator, TargetLocator};
