//! CLI Tooling
//!
//! Command-line interface for browsing the agent catalog and installing agents
//! into the global or project-local agents directory.

use crate::agent::{
    AgentCommandService, AgentFilter, AgentParser, AgentRepository, CatalogSource,
    DirectoryCatalog, EmbeddedCatalog,
};
use crate::config::{AgentsConfig, ConfigLoader};
use crate::error::ApiError;
use crate::install::{
    InstallCommandService, InstallOptions, InstallService, InstallStatus, InstallSummary,
    InstallTarget, SkipReason, StandardTargetLocator, TargetLocator, UninstallStatus,
};
use crate::logging::LoggingOverrides;
use crate::tooling::format;
use crate::tooling::prompt::{self, TerminalResolver};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// claude-agents - Install Claude Code agent definitions
#[derive(Parser)]
#[command(name = "claude-agents")]
#[command(version)]
#[command(about = "Browse and install Claude agent definitions into ~/.claude/agents or ./.claude/agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (local installs go to <workspace>/.claude/agents)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read agent definitions from this directory instead of the bundled set
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging flags as overrides for the configured [`crate::logging::LoggingConfig`].
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            verbose: self.verbose,
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available agents
    List {
        /// Only agents that use this tool
        #[arg(long)]
        tool: Option<String>,
        /// Only agents for this model (case-insensitive)
        #[arg(long)]
        model: Option<String>,
        /// Only agents that require this MCP server
        #[arg(long)]
        mcp: Option<String>,
        /// Case-insensitive search over identifier, name and description
        #[arg(long)]
        search: Option<String>,
        /// Mark which agents are installed at the target location
        #[arg(long)]
        installed: bool,
        /// Inspect the global location (~/.claude/agents)
        #[arg(short, long, conflicts_with = "local")]
        global: bool,
        /// Inspect the local location (./.claude/agents)
        #[arg(short, long)]
        local: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show agent details
    Show {
        /// Agent identifier
        name: String,
        /// Include the agent body
        #[arg(long)]
        content: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List distinct tools, models and MCP servers across the catalog
    Capabilities {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Install agents (opens a picker when no names are given)
    Install {
        /// Agent identifiers to install
        names: Vec<String>,
        /// Install to the global location (~/.claude/agents)
        #[arg(short, long, conflicts_with = "local")]
        global: bool,
        /// Install to the local location (./.claude/agents)
        #[arg(short, long)]
        local: bool,
        /// Install every available agent
        #[arg(short, long, conflicts_with = "names")]
        all: bool,
        /// Overwrite existing agent files without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Remove installed agents
    Uninstall {
        /// Agent identifiers to remove
        names: Vec<String>,
        /// Remove from the global location
        #[arg(short, long, conflicts_with = "local")]
        global: bool,
        /// Remove from the local location
        #[arg(short, long)]
        local: bool,
        /// Remove every installed catalog agent
        #[arg(long, conflicts_with = "names")]
        all: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Rewrite installed agents that differ from the catalog
    Update {
        /// Update the global location
        #[arg(short, long, conflicts_with = "local")]
        global: bool,
        /// Update the local location
        #[arg(short, long)]
        local: bool,
    },
    /// Validate every catalog document independently
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Rendered command output and whether the command fully succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

/// CLI context: effective configuration, the catalog and the install locations.
pub struct CliContext {
    workspace_root: PathBuf,
    config: AgentsConfig,
    repository: AgentRepository,
    locator: Arc<dyn TargetLocator>,
}

impl CliContext {
    /// Create a new CLI context, loading configuration for `workspace_root`.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        catalog_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let workspace_root = resolve_workspace(workspace_root)?;
        let config = Self::load_config(&workspace_root, config_path.as_deref())?;
        Self::with_config(workspace_root, config, catalog_dir)
    }

    /// Load configuration from `config_path` or the standard layers.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<AgentsConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        Ok(config)
    }

    /// Build a context from an already loaded configuration.
    ///
    /// `catalog_dir` takes precedence over `[catalog] directory`; a relative
    /// configured directory is resolved against the workspace.
    pub fn with_config(
        workspace_root: PathBuf,
        config: AgentsConfig,
        catalog_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let workspace_root = resolve_workspace(workspace_root)?;

        let catalog_dir = catalog_dir.or_else(|| {
            config.catalog.directory.as_ref().map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    workspace_root.join(dir)
                }
            })
        });
        let source: Arc<dyn CatalogSource> = match catalog_dir {
            Some(dir) => Arc::new(DirectoryCatalog::new(dir)),
            None => Arc::new(EmbeddedCatalog::new()),
        };
        debug!("Using catalog source {}", source.describe());
        let repository = AgentRepository::new(Arc::new(AgentParser::new(source)));

        let locator: Arc<dyn TargetLocator> = Arc::new(
            StandardTargetLocator::new(workspace_root.clone())
                .with_global_dir(config.install.global_dir.clone())
                .with_local_dir(config.install.local_dir.clone()),
        );

        Ok(Self {
            workspace_root,
            config,
            repository,
            locator,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &AgentsConfig {
        &self.config
    }

    pub fn repository(&self) -> &AgentRepository {
        &self.repository
    }

    fn install_service(&self) -> InstallService {
        InstallService::new(Arc::clone(&self.locator))
    }

    /// `--global` / `--local`, falling back to the configured default target.
    fn target(&self, global: bool, local: bool) -> InstallTarget {
        if global {
            InstallTarget::Global
        } else if local {
            InstallTarget::Local
        } else {
            self.config.install.default_target
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::List {
                tool,
                model,
                mcp,
                search,
                installed,
                global,
                local,
                format,
            } => {
                let filter = AgentFilter {
                    tool: tool.clone(),
                    model: model.clone(),
                    mcp_server: mcp.clone(),
                    query: search.clone(),
                };
                let target = installed.then(|| self.target(*global, *local));
                self.handle_list(&filter, target, format)
            }
            Commands::Show {
                name,
                content,
                format,
            } => self.handle_show(name, *content, format),
            Commands::Capabilities { format } => self.handle_capabilities(format),
            Commands::Install {
                names,
                global,
                local,
                all,
                force,
            } => self.handle_install(names, self.target(*global, *local), *all, *force),
            Commands::Uninstall {
                names,
                global,
                local,
                all,
                yes,
            } => self.handle_uninstall(names, self.target(*global, *local), *all, *yes),
            Commands::Update { global, local } => self.handle_update(self.target(*global, *local)),
            Commands::Validate { format } => self.handle_validate(format),
            Commands::Config => Ok(CommandOutput::ok(ConfigLoader::to_toml(&self.config)?)),
        }
    }

    fn handle_list(
        &self,
        filter: &AgentFilter,
        installed_at: Option<InstallTarget>,
        format: &str,
    ) -> Result<CommandOutput, ApiError> {
        let installed = match installed_at {
            Some(target) => {
                let agents = self.repository.load_agents()?;
                Some(self.install_service().installed(&agents, target)?)
            }
            None => None,
        };
        let result = AgentCommandService::list(&self.repository, filter, installed.as_ref())?;
        let text = match format {
            "json" => format::format_agent_list_json(&result),
            _ => format::format_agent_list_text(&result),
        };
        Ok(CommandOutput::ok(text))
    }

    fn handle_show(
        &self,
        name: &str,
        include_content: bool,
        format: &str,
    ) -> Result<CommandOutput, ApiError> {
        let result = AgentCommandService::show(&self.repository, name, include_content)?;
        let text = match format {
            "json" => format::format_agent_show_json(&result),
            _ => format::format_agent_show_text(&result),
        };
        Ok(CommandOutput::ok(text))
    }

    fn handle_capabilities(&self, format: &str) -> Result<CommandOutput, ApiError> {
        let result = AgentCommandService::capabilities(&self.repository)?;
        let text = match format {
            "json" => format::format_capabilities_json(&result),
            _ => format::format_capabilities_text(&result),
        };
        Ok(CommandOutput::ok(text))
    }

    fn handle_validate(&self, format: &str) -> Result<CommandOutput, ApiError> {
        let result = AgentCommandService::validate(&self.repository)?;
        let text = match format {
            "json" => format::format_validation_json(&result),
            _ => format::format_validation_text(&result),
        };
        Ok(CommandOutput {
            text,
            success: result.is_valid(),
        })
    }

    /// Install named agents, every agent (`--all`), or agents picked interactively.
    ///
    /// Conflicts are resolved on the terminal unless names were given or `--force` is set.
    fn handle_install(
        &self,
        names: &[String],
        target: InstallTarget,
        all: bool,
        force: bool,
    ) -> Result<CommandOutput, ApiError> {
        let mut notes = String::new();
        let agents = if !all && names.is_empty() {
            let available = self.repository.load_agents()?;
            if available.is_empty() {
                return Ok(CommandOutput::ok("No agents available to install"));
            }
            let indices = prompt::pick_agents(&available)?;
            InstallCommandService::select_indices(&available, &indices)
        } else {
            let selection = InstallCommandService::select(&self.repository, names, all)?;
            for name in &selection.missing {
                notes.push_str(&format!("Warning: Agent '{}' not found, skipping...\n", name));
            }
            selection.agents
        };

        if agents.is_empty() {
            return Ok(CommandOutput::ok(format!("{}No agents to install", notes)));
        }

        let options = InstallOptions {
            overwrite: force,
            interactive: !force && names.is_empty(),
        };
        let mut service = self.install_service();
        if options.interactive {
            service = service.with_resolver(Arc::new(TerminalResolver));
        }
        let target_dir = service.target_dir(target)?;
        let results = service.install(&agents, target, options);
        let summary = InstallSummary::from_results(&results);
        Ok(CommandOutput {
            text: format!(
                "{}{}",
                notes,
                format::format_install_results(&results, target, &target_dir)
            ),
            success: !summary.has_failures(),
        })
    }

    fn handle_uninstall(
        &self,
        names: &[String],
        target: InstallTarget,
        all: bool,
        yes: bool,
    ) -> Result<CommandOutput, ApiError> {
        let service = self.install_service();
        let identifiers: Vec<String> = if all {
            let agents = self.repository.load_agents()?;
            service.installed(&agents, target)?.into_iter().collect()
        } else if names.is_empty() {
            return Err(ApiError::ConfigError(
                "Specify agent names to uninstall or --all".to_string(),
            ));
        } else {
            if let Some(bad) = names.iter().find(|n| !is_plain_identifier(n)) {
                return Err(ApiError::ConfigError(format!("Invalid agent name: {}", bad)));
            }
            names.to_vec()
        };

        let target_dir = service.target_dir(target)?;
        if identifiers.is_empty() {
            return Ok(CommandOutput::ok(format!(
                "No installed agents found at {}",
                target_dir.display()
            )));
        }

        if !yes {
            let confirmed = prompt::confirm(&format!(
                "Remove {} agent(s) from {}?",
                identifiers.len(),
                target_dir.display()
            ))?;
            if !confirmed {
                return Ok(CommandOutput::ok("Uninstall cancelled"));
            }
        }

        let results = service.uninstall(&identifiers, target);
        let success = !results
            .iter()
            .any(|r| matches!(r.status, UninstallStatus::Failed(_)));
        Ok(CommandOutput {
            text: format::format_uninstall_results(&results),
            success,
        })
    }

    fn handle_update(&self, target: InstallTarget) -> Result<CommandOutput, ApiError> {
        let service = self.install_service();
        let target_dir = service.target_dir(target)?;
        let agents = self.repository.load_agents()?;

        let results: Vec<_> = service
            .update(&agents, target)
            .into_iter()
            .filter(|r| !matches!(r.status, InstallStatus::Skipped(SkipReason::NotInstalled)))
            .collect();
        if results.is_empty() {
            return Ok(CommandOutput::ok(format!(
                "No installed agents found at {}",
                target_dir.display()
            )));
        }

        let summary = InstallSummary::from_results(&results);
        Ok(CommandOutput {
            text: format::format_install_results(&results, target, &target_dir),
            success: !summary.has_failures(),
        })
    }
}

fn resolve_workspace(workspace_root: PathBuf) -> Result<PathBuf, ApiError> {
    dunce::canonicalize(&workspace_root).map_err(|e| {
        ApiError::ConfigError(format!(
            "Workspace not found: {} ({})",
            workspace_root.display(),
            e
        ))
    })
}

/// Names passed to uninstall map straight onto file names; reject anything that
/// could escape the target directory.
fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
