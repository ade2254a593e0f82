//! Install command service: resolves requested names against the catalog.

use crate::agent::{Agent, AgentRepository};
use crate::error::ApiError;

pub struct InstallCommandService;

/// Agents resolved for an install, update or uninstall request.
#[derive(Debug, Clone, Default)]
pub struct AgentSelection {
    pub agents: Vec<Agent>,
    /// Requested names with no catalog entry; reported as warnings
    pub missing: Vec<String>,
}

impl AgentSelection {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl InstallCommandService {
    /// Resolve `names` in request order, or the whole catalog when `all` is set.
    /// Repeated names resolve once.
    pub fn select(
        repository: &AgentRepository,
        names: &[String],
        all: bool,
    ) -> Result<AgentSelection, ApiError> {
        if all {
            return Ok(AgentSelection {
                agents: repository.load_agents()?,
                missing: Vec::new(),
            });
        }

        let mut selection = AgentSelection::default();
        for name in names {
            if selection.agents.iter().any(|a| &a.identifier == name) {
                continue;
            }
            match repository.get_agent(name)? {
                Some(agent) => selection.agents.push(agent),
                None => {
                    tracing::warn!("Agent '{}' not found in catalog", name);
                    selection.missing.push(name.clone());
                }
            }
        }
        Ok(selection)
    }

    /// Pick agents by zero-based indices into `available`, ignoring out-of-range ones.
    pub fn select_indices(available: &[Agent], indices: &[usize]) -> Vec<Agent> {
        indices
            .iter()
            .filter_map(|&i| available.get(i).cloned())
            .collect()
    }
}
