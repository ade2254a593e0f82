//! Agent repository: read-only queries over the parsed catalog.
//!
//! Every query goes through [`AgentParser::load_all`], so all queries share one
//! cache and none of them mutate it. `clear_cache` is the only mutator and
//! delegates to the parser.

use crate::agent::domain::Agent;
use crate::agent::parser::AgentParser;
use crate::error::ParseError;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct AgentRepository {
    parser: Arc<AgentParser>,
}

impl AgentRepository {
    pub fn new(parser: Arc<AgentParser>) -> Self {
        Self { parser }
    }

    /// Repository over the agents bundled into the binary.
    pub fn embedded() -> Self {
        Self::new(Arc::new(AgentParser::embedded()))
    }

    pub fn parser(&self) -> &Arc<AgentParser> {
        &self.parser
    }

    /// All agents, sorted by identifier.
    pub fn load_agents(&self) -> Result<Vec<Agent>, ParseError> {
        Ok(self.parser.load_all()?.to_vec())
    }

    pub fn get_agent(&self, identifier: &str) -> Result<Option<Agent>, ParseError> {
        self.parser.find_by_identifier(identifier)
    }

    /// Agents whose tool set contains `tool` exactly.
    pub fn by_tool(&self, tool: &str) -> Result<Vec<Agent>, ParseError> {
        self.filter(|a| a.uses_tool(tool))
    }

    /// Agents whose model equals `model`, ignoring case.
    pub fn by_model(&self, model: &str) -> Result<Vec<Agent>, ParseError> {
        self.filter(|a| a.has_model(model))
    }

    /// Agents that require the MCP server `server`.
    pub fn by_mcp_server(&self, server: &str) -> Result<Vec<Agent>, ParseError> {
        self.filter(|a| a.requires_mcp_server(server))
    }

    /// Case-insensitive substring search over identifier, name and description.
    pub fn search(&self, query: &str) -> Result<Vec<Agent>, ParseError> {
        self.filter(|a| a.matches_query(query))
    }

    pub fn all_tools(&self) -> Result<HashSet<String>, ParseError> {
        let agents = self.parser.load_all()?;
        Ok(agents.iter().flat_map(|a| a.tools.iter().cloned()).collect())
    }

    pub fn all_models(&self) -> Result<HashSet<String>, ParseError> {
        let agents = self.parser.load_all()?;
        Ok(agents.iter().filter_map(|a| a.model.clone()).collect())
    }

    pub fn all_mcp_servers(&self) -> Result<HashSet<String>, ParseError> {
        let agents = self.parser.load_all()?;
        Ok(agents
            .iter()
            .flat_map(|a| a.integrations.iter().cloned())
            .collect())
    }

    pub fn clear_cache(&self) {
        self.parser.clear_cache();
    }

    fn filter<F>(&self, predicate: F) -> Result<Vec<Agent>, ParseError>
    where
        F: Fn(&Agent) -> bool,
    {
        let agents = self.parser.load_all()?;
        Ok(agents.iter().filter(|a| predicate(a)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::catalog::MemoryCatalog;

    fn repository() -> AgentRepository {
        let catalog = MemoryCatalog::new(vec![
            ("alpha", "---\ndescription: Shell automation\ntools: [bash]\n---\nalpha\n"),
            (
                "beta",
                "---\ndescription: Reads code\ntools: [read]\nmodel: opus\nmcp: [github]\n---\nbeta\n",
            ),
        ]);
        AgentRepository::new(Arc::new(AgentParser::new(Arc::new(catalog))))
    }

    fn ids(agents: &[Agent]) -> Vec<&str> {
        agents.iter().map(|a| a.identifier.as_str()).collect()
    }

    #[test]
    fn test_by_tool_exact_membership() {
        let repo = repository();
        assert_eq!(ids(&repo.by_tool("bash").unwrap()), vec!["alpha"]);
        assert!(repo.by_tool("Bash").unwrap().is_empty());
        assert!(repo.by_tool("ba").unwrap().is_empty());
    }

    #[test]
    fn test_by_model_case_insensitive() {
        let repo = repository();
        assert_eq!(ids(&repo.by_model("OPUS").unwrap()), vec!["beta"]);
        assert!(repo.by_model("sonnet").unwrap().is_empty());
    }

    #[test]
    fn test_by_mcp_server() {
        let repo = repository();
        assert_eq!(ids(&repo.by_mcp_server("github").unwrap()), vec!["beta"]);
        assert!(repo.by_mcp_server("gitlab").unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let repo = repository();
        assert_eq!(ids(&repo.search("alp").unwrap()), vec!["alpha"]);
        assert_eq!(ids(&repo.search("READS").unwrap()), vec!["beta"]);
        assert_eq!(repo.search("").unwrap().len(), 2);
    }

    #[test]
    fn test_aggregates() {
        let repo = repository();
        let tools = repo.all_tools().unwrap();
        assert_eq!(tools.len(), 2);
        assert!(tools.contains("bash") && tools.contains("read"));

        let models = repo.all_models().unwrap();
        assert_eq!(models, HashSet::from(["opus".to_string()]));

        let servers = repo.all_mcp_servers().unwrap();
        assert_eq!(servers, HashSet::from(["github".to_string()]));
    }

    #[test]
    fn test_queries_share_cache() {
        let repo = repository();
        repo.by_tool("bash").unwrap();
        assert!(repo.parser().is_cached());
        repo.clear_cache();
        assert!(!repo.parser().is_cached());
        assert!(repo.get_agent("alpha").unwrap().is_some());
        assert!(repo.get_agent("missing").unwrap().is_none());
    }
}
