//! Bundled agents, compiled into the binary with `include_str!`.
//!
//! To add a bundled agent:
//! 1. Create `resources/agents/<identifier>.md`
//! 2. Add an entry to `BUNDLED_AGENTS`

use super::{identifier_from_file_name, CatalogDocument, CatalogSource};
use crate::error::ParseError;

/// An agent document embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BundledAgent {
    pub file_name: &'static str,
    pub raw: &'static str,
}

static BUNDLED_AGENTS: &[BundledAgent] = &[
    BundledAgent {
        file_name: "code-reviewer.md",
        raw: include_str!("../../../resources/agents/code-reviewer.md"),
    },
    BundledAgent {
        file_name: "github-workflow.md",
        raw: include_str!("../../../resources/agents/github-workflow.md"),
    },
    BundledAgent {
        file_name: "gitlab-release.md",
        raw: include_str!("../../../resources/agents/gitlab-release.md"),
    },
    BundledAgent {
        file_name: "swift-architect.md",
        raw: include_str!("../../../resources/agents/swift-architect.md"),
    },
    BundledAgent {
        file_name: "testing-specialist.md",
        raw: include_str!("../../../resources/agents/testing-specialist.md"),
    },
];

/// All bundled agent documents.
pub fn bundled_agents() -> &'static [BundledAgent] {
    BUNDLED_AGENTS
}

/// Catalog source backed by the bundled agents.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl EmbeddedCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogSource for EmbeddedCatalog {
    fn documents(&self) -> Result<Vec<CatalogDocument>, ParseError> {
        bundled_agents()
            .iter()
            .map(|bundled| {
                let identifier = identifier_from_file_name(bundled.file_name).ok_or_else(|| {
                    ParseError::invalid_format(bundled.file_name, "cannot derive identifier from file name")
                })?;
                Ok(CatalogDocument::new(
                    identifier,
                    format!("embedded:{}", bundled.file_name),
                    bundled.raw,
                ))
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("bundled catalog ({} agents)", BUNDLED_AGENTS.len())
    }
}
