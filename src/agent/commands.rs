//! Agent command service: one entry point per catalog CLI command.
//!
//! Owns the catalog query workflow; the CLI parses, calls one method per variant,
//! and formats output.

use crate::agent::domain::Agent;
use crate::agent::repository::AgentRepository;
use crate::error::ApiError;
use serde::Serialize;
use std::collections::BTreeSet;

pub struct AgentCommandService;

/// Filters for the list command. All set filters must match.
#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    pub tool: Option<String>,
    pub model: Option<String>,
    pub mcp_server: Option<String>,
    pub query: Option<String>,
}

impl AgentFilter {
    pub fn is_empty(&self) -> bool {
        self.tool.is_none() && self.model.is_none() && self.mcp_server.is_none() && self.query.is_none()
    }

    fn matches(&self, agent: &Agent) -> bool {
        self.tool.as_deref().map_or(true, |t| agent.uses_tool(t))
            && self.model.as_deref().map_or(true, |m| agent.has_model(m))
            && self
                .mcp_server
                .as_deref()
                .map_or(true, |s| agent.requires_mcp_server(s))
            && self.query.as_deref().map_or(true, |q| agent.matches_query(q))
    }
}

/// Result of agent list command.
#[derive(Debug, Clone)]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentListItem {
    pub identifier: String,
    pub description: String,
    pub model: Option<String>,
    pub tools: BTreeSet<String>,
    pub mcp: BTreeSet<String>,
    /// Whether the agent is present at the inspected target, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed: Option<bool>,
}

/// Result of agent show command.
#[derive(Debug, Clone)]
pub struct AgentShowResult {
    pub agent: Agent,
    pub include_content: bool,
}

/// Distinct capabilities across the catalog, sorted for display.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesResult {
    pub tools: Vec<String>,
    pub models: Vec<String>,
    pub mcp_servers: Vec<String>,
}

/// One row of the validate command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationEntry {
    pub identifier: String,
    pub origin: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AgentValidateResult {
    pub entries: Vec<ValidationEntry>,
}

impl AgentValidateResult {
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|e| e.valid)
    }

    pub fn invalid_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.valid).count()
    }
}

impl AgentCommandService {
    /// List agents matching `filter`. `installed` marks agents present at a target.
    pub fn list(
        repository: &AgentRepository,
        filter: &AgentFilter,
        installed: Option<&BTreeSet<String>>,
    ) -> Result<AgentListResult, ApiError> {
        let agents = repository.load_agents()?;
        let items = agents
            .into_iter()
            .filter(|a| filter.matches(a))
            .map(|a| AgentListItem {
                installed: installed.map(|set| set.contains(&a.identifier)),
                identifier: a.identifier,
                description: a.description,
                model: a.model,
                tools: a.tools,
                mcp: a.integrations,
            })
            .collect();
        Ok(AgentListResult { agents: items })
    }

    /// Show one agent; `include_content` controls whether the body is rendered.
    pub fn show(
        repository: &AgentRepository,
        identifier: &str,
        include_content: bool,
    ) -> Result<AgentShowResult, ApiError> {
        let agent = repository
            .get_agent(identifier)?
            .ok_or_else(|| ApiError::AgentNotFound(identifier.to_string()))?;
        Ok(AgentShowResult {
            agent,
            include_content,
        })
    }

    pub fn capabilities(repository: &AgentRepository) -> Result<CapabilitiesResult, ApiError> {
        let sorted = |set: std::collections::HashSet<String>| {
            let mut v: Vec<String> = set.into_iter().collect();
            v.sort();
            v
        };
        Ok(CapabilitiesResult {
            tools: sorted(repository.all_tools()?),
            models: sorted(repository.all_models()?),
            mcp_servers: sorted(repository.all_mcp_servers()?),
        })
    }

    /// Validate every catalog document independently.
    pub fn validate(repository: &AgentRepository) -> Result<AgentValidateResult, ApiError> {
        let entries = repository
            .parser()
            .diagnose()?
            .into_iter()
            .map(|d| ValidationEntry {
                valid: d.is_valid(),
                error: d.result.err().map(|e| e.to_string()),
                identifier: d.identifier,
                origin: d.origin,
            })
            .collect();
        Ok(AgentValidateResult { entries })
    }
}
