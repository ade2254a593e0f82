//! Install service: writes agent bodies into a target directory.
//!
//! Each call processes its agents strictly in input order and returns one result
//! per agent. A target directory that cannot be resolved or created fails the whole
//! batch; any other failure is recorded against its agent and the batch continues.

use crate::agent::Agent;
use crate::error::InstallError;
use crate::install::resolver::{Conflict, ConflictResolution, ConflictResolver};
use crate::install::target::{InstallTarget, TargetLocator};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Conflict handling for one install call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Replace existing files without asking
    pub overwrite: bool,
    /// Ask the configured resolver about existing files
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyExists,
    UserDeclined,
    UpToDate,
    NotInstalled,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SkipReason::AlreadyExists => "already exists",
            SkipReason::UserDeclined => "user declined",
            SkipReason::UpToDate => "up to date",
            SkipReason::NotInstalled => "not installed",
        })
    }
}

#[derive(Debug)]
pub enum InstallStatus {
    Installed,
    Overwritten,
    Skipped(SkipReason),
    Failed(InstallError),
}

#[derive(Debug)]
pub struct InstallResult {
    pub agent: Agent,
    pub destination: PathBuf,
    pub status: InstallStatus,
}

/// Per-disposition counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl InstallSummary {
    pub fn from_results(results: &[InstallResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                InstallStatus::Installed => summary.installed += 1,
                InstallStatus::Overwritten => summary.overwritten += 1,
                InstallStatus::Skipped(_) => summary.skipped += 1,
                InstallStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.installed + self.overwritten + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug)]
pub enum UninstallStatus {
    Removed,
    NotInstalled,
    Failed(InstallError),
}

#[derive(Debug)]
pub struct UninstallResult {
    pub identifier: String,
    pub path: PathBuf,
    pub status: UninstallStatus,
}

pub struct InstallService {
    locator: Arc<dyn TargetLocator>,
    resolver: Option<Arc<dyn ConflictResolver>>,
}

impl InstallService {
    pub fn new(locator: Arc<dyn TargetLocator>) -> Self {
        Self {
            locator,
            resolver: None,
        }
    }

    /// Resolver consulted for conflicts when `interactive` is set. Without one,
    /// interactive conflicts are skipped as already existing.
    pub fn with_resolver(mut self, resolver: Arc<dyn ConflictResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn target_dir(&self, target: InstallTarget) -> Result<PathBuf, InstallError> {
        self.locator.locate(target)
    }

    /// Install `agents` into `target`, one result per agent in input order.
    pub fn install(
        &self,
        agents: &[Agent],
        target: InstallTarget,
        options: InstallOptions,
    ) -> Vec<InstallResult> {
        let dir = match self.locator.locate(target) {
            Ok(dir) => dir,
            Err(err) => {
                warn!("Cannot resolve {} install target: {}", target, err);
                return fail_all(agents, Path::new(""), |_| duplicate_error(&err));
            }
        };

        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!("Failed to create agents directory {}: {}", dir.display(), e);
            let reason = e.to_string();
            return fail_all(agents, &dir, |_| InstallError::DirectoryCreationFailed {
                path: dir.clone(),
                reason: reason.clone(),
            });
        }

        info!(
            "Installing {} agent(s) to {} ({})",
            agents.len(),
            dir.display(),
            target
        );
        agents
            .iter()
            .map(|agent| self.install_one(agent, &dir, options))
            .collect()
    }

    fn install_one(&self, agent: &Agent, dir: &Path, options: InstallOptions) -> InstallResult {
        let destination = dir.join(agent.file_name());

        let status = if !destination.exists() {
            match write_agent_file(dir, &destination, &agent.content, false) {
                Ok(()) => InstallStatus::Installed,
                Err(e) => InstallStatus::Failed(InstallError::from_io(&agent.identifier, &destination, e)),
            }
        } else {
            match self.conflict_decision(agent, &destination, options) {
                Ok(()) => match write_agent_file(dir, &destination, &agent.content, true) {
                    Ok(()) => InstallStatus::Overwritten,
                    Err(e) => InstallStatus::Failed(InstallError::from_io(&agent.identifier, &destination, e)),
                },
                Err(reason) => InstallStatus::Skipped(reason),
            }
        };

        match &status {
            InstallStatus::Installed => info!("Installed agent {} at {}", agent.identifier, destination.display()),
            InstallStatus::Overwritten => info!("Overwrote agent {} at {}", agent.identifier, destination.display()),
            InstallStatus::Skipped(reason) => debug!("Skipped agent {}: {}", agent.identifier, reason),
            InstallStatus::Failed(e) => warn!("Failed to install agent {}: {}", agent.identifier, e),
        }

        InstallResult {
            agent: agent.clone(),
            destination,
            status,
        }
    }

    /// `Ok` when an existing destination should be replaced, otherwise the skip reason.
    fn conflict_decision(
        &self,
        agent: &Agent,
        destination: &Path,
        options: InstallOptions,
    ) -> Result<(), SkipReason> {
        if options.overwrite {
            return Ok(());
        }
        if !options.interactive {
            return Err(SkipReason::AlreadyExists);
        }
        let Some(resolver) = &self.resolver else {
            return Err(SkipReason::AlreadyExists);
        };
        match resolver.resolve(&Conflict { agent, destination }) {
            ConflictResolution::Overwrite => Ok(()),
            ConflictResolution::Skip => Err(SkipReason::UserDeclined),
        }
    }

    /// Rewrite installed agents whose file content differs from the catalog.
    pub fn update(&self, agents: &[Agent], target: InstallTarget) -> Vec<InstallResult> {
        let dir = match self.locator.locate(target) {
            Ok(dir) => dir,
            Err(err) => return fail_all(agents, Path::new(""), |_| duplicate_error(&err)),
        };

        agents
            .iter()
            .map(|agent| {
                let destination = dir.join(agent.file_name());
                let status = if !destination.is_file() {
                    InstallStatus::Skipped(SkipReason::NotInstalled)
                } else {
                    match std::fs::read(&destination) {
                        Ok(existing) if existing == agent.content.as_bytes() => {
                            InstallStatus::Skipped(SkipReason::UpToDate)
                        }
                        Ok(_) => match write_agent_file(&dir, &destination, &agent.content, true) {
                            Ok(()) => {
                                info!("Updated agent {} at {}", agent.identifier, destination.display());
                                InstallStatus::Overwritten
                            }
                            Err(e) => InstallStatus::Failed(InstallError::from_io(
                                &agent.identifier,
                                &destination,
                                e,
                            )),
                        },
                        Err(e) => InstallStatus::Failed(InstallError::from_io(&agent.identifier, &destination, e)),
                    }
                };
                InstallResult {
                    agent: agent.clone(),
                    destination,
                    status,
                }
            })
            .collect()
    }

    /// Remove installed agent files by identifier.
    pub fn uninstall(&self, identifiers: &[String], target: InstallTarget) -> Vec<UninstallResult> {
        let dir = match self.locator.locate(target) {
            Ok(dir) => dir,
            Err(err) => {
                return identifiers
                    .iter()
                    .map(|id| UninstallResult {
                        identifier: id.clone(),
                        path: PathBuf::new(),
                        status: UninstallStatus::Failed(duplicate_error(&err)),
                    })
                    .collect()
            }
        };

        identifiers
            .iter()
            .map(|id| {
                let path = dir.join(format!("{}.md", id));
                let status = if !path.is_file() {
                    UninstallStatus::NotInstalled
                } else {
                    match std::fs::remove_file(&path) {
                        Ok(()) => {
                            info!("Removed agent {} from {}", id, dir.display());
                            UninstallStatus::Removed
                        }
                        Err(e) => UninstallStatus::Failed(InstallError::from_io(id, &path, e)),
                    }
                };
                UninstallResult {
                    identifier: id.clone(),
                    path,
                    status,
                }
            })
            .collect()
    }

    /// Identifiers of `agents` that have a file at `target`.
    pub fn installed(&self, agents: &[Agent], target: InstallTarget) -> Result<BTreeSet<String>, InstallError> {
        let dir = self.locator.locate(target)?;
        Ok(agents
            .iter()
            .filter(|a| dir.join(a.file_name()).is_file())
            .map(|a| a.identifier.clone())
            .collect())
    }
}

/// Write `content` to a temp file in `dir` and rename it onto `destination`.
///
/// With `replace == false` the rename refuses to clobber a file that appeared
/// after the existence check. A replaced file keeps its permissions; new files
/// are 0644.
fn write_agent_file(dir: &Path, destination: &Path, content: &str, replace: bool) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = replace
            .then(|| std::fs::metadata(destination).ok())
            .flatten()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.permissions())
            .unwrap_or_else(|| std::fs::Permissions::from_mode(0o644));
        tmp.as_file().set_permissions(permissions)?;
    }
    if replace {
        tmp.persist(destination).map_err(|e| e.error)?;
    } else {
        tmp.persist_noclobber(destination).map_err(|e| e.error)?;
    }
    Ok(())
}

fn fail_all<F>(agents: &[Agent], dir: &Path, make_error: F) -> Vec<InstallResult>
where
    F: Fn(&Agent) -> InstallError,
{
    agents
        .iter()
        .map(|agent| InstallResult {
            agent: agent.clone(),
            destination: dir.join(agent.file_name()),
            status: InstallStatus::Failed(make_error(agent)),
        })
        .collect()
}

/// Rebuild an error so a batch-level failure can be attached to every agent.
fn duplicate_error(err: &InstallError) -> InstallError {
    match err {
        InstallError::PermissionDenied(p) => InstallError::PermissionDenied(p.clone()),
        InstallError::AlreadyExists { name, path } => InstallError::AlreadyExists {
            name: name.clone(),
            path: path.clone(),
        },
        InstallError::DirectoryCreationFailed { path, reason } => InstallError::DirectoryCreationFailed {
            path: path.clone(),
            reason: reason.clone(),
        },
        InstallError::CopyFailed { name, source } => InstallError::CopyFailed {
            name: name.clone(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        },
        InstallError::TargetNotFound(p) => InstallError::TargetNotFound(p.clone()),
    }
}
