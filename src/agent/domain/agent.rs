//! The parsed agent record.

use serde::Serialize;
use std::collections::BTreeSet;

/// A parsed agent definition.
///
/// Built once by the parser and never mutated afterwards. `source` records the
/// originating document for diagnostics and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    /// Unique key derived from the document stem; also the installed file name
    pub identifier: String,
    /// Display name from the header, or the identifier when absent
    pub name: String,
    pub description: String,
    pub tools: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Required MCP servers (header key `mcp`)
    #[serde(rename = "mcp")]
    pub integrations: BTreeSet<String>,
    /// Document body after the closing header sentinel, verbatim
    #[serde(skip_serializing)]
    pub content: String,
    #[serde(skip)]
    pub source: String,
}

impl Agent {
    /// File name used when this agent is installed.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.identifier)
    }

    pub fn uses_tool(&self, tool: &str) -> bool {
        self.tools.contains(tool)
    }

    pub fn requires_mcp_server(&self, server: &str) -> bool {
        self.integrations.contains(server)
    }

    /// Case-insensitive model comparison; agents without a model never match.
    pub fn has_model(&self, model: &str) -> bool {
        self.model
            .as_deref()
            .map(|m| m.to_lowercase() == model.to_lowercase())
            .unwrap_or(false)
    }

    /// Case-insensitive substring match over identifier, name and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.identifier.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

impl PartialEq for Agent {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.name == other.name
            && self.description == other.description
            && self.tools == other.tools
            && self.model == other.model
            && self.integrations == other.integrations
            && self.content == other.content
    }
}

impl Eq for Agent {}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(identifier: &str, source: &str) -> Agent {
        Agent {
            identifier: identifier.to_string(),
            name: identifier.to_string(),
            description: "Reviews Rust code".to_string(),
            tools: ["Read".to_string(), "Bash".to_string()].into_iter().collect(),
            model: Some("Opus".to_string()),
            integrations: BTreeSet::new(),
            content: "body\n".to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_equality_ignores_source() {
        assert_eq!(agent("alpha", "embedded:alpha.md"), agent("alpha", "/tmp/alpha.md"));
        assert_ne!(agent("alpha", "x"), agent("beta", "x"));
    }

    #[test]
    fn test_model_match_is_case_insensitive() {
        let a = agent("alpha", "x");
        assert!(a.has_model("opus"));
        assert!(a.has_model("OPUS"));
        assert!(!a.has_model("sonnet"));

        let mut no_model = a.clone();
        no_model.model = None;
        assert!(!no_model.has_model("opus"));
    }

    #[test]
    fn test_query_matches_description() {
        let a = agent("alpha", "x");
        assert!(a.matches_query("RUST"));
        assert!(a.matches_query("alp"));
        assert!(!a.matches_query("python"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(agent("swift-architect", "x").file_name(), "swift-architect.md");
    }
}
