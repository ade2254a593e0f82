//! Install targets and their resolution to directories.

use crate::error::InstallError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the home or workspace root that holds installed agents.
pub const AGENTS_SUBDIR: &str = ".claude/agents";

/// Where agents are installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallTarget {
    /// Per-user directory (`~/.claude/agents`)
    #[default]
    Global,
    /// Project directory (`./.claude/agents`)
    Local,
}

impl InstallTarget {
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallTarget::Global => "global",
            InstallTarget::Local => "local",
        }
    }
}

impl std::fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Resolves an [`InstallTarget`] to an absolute directory at the moment of use.
pub trait TargetLocator: Send + Sync {
    fn locate(&self, target: InstallTarget) -> Result<PathBuf, InstallError>;
}

/// Home-directory and workspace based resolution, with optional overrides.
#[derive(Debug, Clone)]
pub struct StandardTargetLocator {
    workspace_root: PathBuf,
    global_dir: Option<PathBuf>,
    local_dir: Option<PathBuf>,
}

impl StandardTargetLocator {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            global_dir: None,
            local_dir: None,
        }
    }

    /// Replace the global directory (default `~/.claude/agents`).
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Replace the local directory; relative paths are joined onto the workspace root.
    pub fn with_local_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.local_dir = dir;
        self
    }

    fn home_dir() -> Result<PathBuf, InstallError> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| InstallError::TargetNotFound(PathBuf::from("~")))
    }
}

impl TargetLocator for StandardTargetLocator {
    fn locate(&self, target: InstallTarget) -> Result<PathBuf, InstallError> {
        match target {
            InstallTarget::Global => match &self.global_dir {
                Some(dir) => Ok(dir.clone()),
                None => Ok(Self::home_dir()?.join(AGENTS_SUBDIR)),
            },
            InstallTarget::Local => Ok(match &self.local_dir {
                Some(dir) if dir.is_absolute() => dir.clone(),
                Some(dir) => self.workspace_root.join(dir),
                None => self.workspace_root.join(AGENTS_SUBDIR),
            }),
        }
    }
}

/// Locator that maps both targets to fixed directories.
#[derive(Debug, Clone)]
pub struct FixedTargetLocator {
    pub global: PathBuf,
    pub local: PathBuf,
}

impl FixedTargetLocator {
    /// Both targets under `root`: `root/global` and `root/local`.
    pub fn under(root: &Path) -> Self {
        Self {
            global: root.join("global"),
            local: root.join("local"),
        }
    }
}

impl TargetLocator for FixedTargetLocator {
    fn locate(&self, target: InstallTarget) -> Result<PathBuf, InstallError> {
        Ok(match target {
            InstallTarget::Global => self.global.clone(),
            InstallTarget::Local => self.local.clone(),
        })
    }
}
