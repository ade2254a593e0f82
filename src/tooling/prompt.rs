//! Terminal prompts backed by `dialoguer`.

use crate::agent::Agent;
use crate::error::ApiError;
use crate::install::{Conflict, ConflictResolution, ConflictResolver};
use dialoguer::{Confirm, MultiSelect};

/// Asks on the terminal whether to overwrite each conflicting agent file.
///
/// A prompt that cannot be shown (no TTY, interrupted) counts as a decline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalResolver;

impl ConflictResolver for TerminalResolver {
    fn resolve(&self, conflict: &Conflict<'_>) -> ConflictResolution {
        let answer = Confirm::new()
            .with_prompt(format!(
                "Agent '{}' already exists at {}. Overwrite?",
                conflict.agent.identifier,
                conflict.destination.display()
            ))
            .default(false)
            .interact();
        match answer {
            Ok(true) => ConflictResolution::Overwrite,
            Ok(false) => ConflictResolution::Skip,
            Err(e) => {
                tracing::warn!("Conflict prompt failed for {}: {}", conflict.agent.identifier, e);
                ConflictResolution::Skip
            }
        }
    }
}

/// Multi-select picker over `agents`; returns the chosen indices.
pub fn pick_agents(agents: &[Agent]) -> Result<Vec<usize>, ApiError> {
    let items: Vec<String> = agents.iter().map(picker_label).collect();
    MultiSelect::new()
        .with_prompt("Select agents to install (space to toggle, enter to confirm)")
        .items(&items)
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
}

/// Yes/no confirmation defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool, ApiError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
}

fn picker_label(agent: &Agent) -> String {
    format!("{} - {}", agent.identifier, agent.description)
}
