//! Agent parser and process-lifetime catalog cache.
//!
//! The full parsed catalog is cached behind a mutex that is held for the whole
//! load, so concurrent first callers trigger exactly one read of the source and
//! nobody ever observes a partially populated cache. A load is all or nothing:
//! one bad document fails the load and leaves the cache empty.

use crate::agent::catalog::{CatalogSource, EmbeddedCatalog};
use crate::agent::domain::{parse_agent, Agent};
use crate::error::ParseError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of parsing one document in isolation.
#[derive(Debug)]
pub struct DocumentDiagnostic {
    pub identifier: String,
    pub origin: String,
    pub result: Result<(), ParseError>,
}

impl DocumentDiagnostic {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct AgentParser {
    source: Arc<dyn CatalogSource>,
    cache: Mutex<Option<Arc<[Agent]>>>,
}

impl AgentParser {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    /// Parser over the agents bundled into the binary.
    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedCatalog::new()))
    }

    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    /// Load every agent, sorted by identifier, parsing the source on first use.
    pub fn load_all(&self) -> Result<Arc<[Agent]>, ParseError> {
        let mut cache = self.cache.lock();
        if let Some(agents) = cache.as_ref() {
            debug!("Agent catalog cache hit ({} agents)", agents.len());
            return Ok(Arc::clone(agents));
        }

        let agents: Arc<[Agent]> = parse_catalog(self.source.as_ref())?.into();
        info!(
            "Loaded {} agents from {}",
            agents.len(),
            self.source.describe()
        );
        *cache = Some(Arc::clone(&agents));
        Ok(agents)
    }

    /// Look up one agent by identifier. A missing agent is `Ok(None)`.
    pub fn find_by_identifier(&self, identifier: &str) -> Result<Option<Agent>, ParseError> {
        let agents = self.load_all()?;
        Ok(agents.iter().find(|a| a.identifier == identifier).cloned())
    }

    /// Drop the cached catalog; the next query re-reads the source.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        if cache.take().is_some() {
            debug!("Agent catalog cache cleared");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.lock().is_some()
    }

    /// Parse every document independently and report each outcome.
    ///
    /// Unlike [`load_all`](Self::load_all) this never fails on a bad document and
    /// never touches the cache. Only a failure to enumerate the source is an error.
    pub fn diagnose(&self) -> Result<Vec<DocumentDiagnostic>, ParseError> {
        let documents = self.source.documents()?;
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut diagnostics = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut result = parse_agent(&doc.identifier, &doc.origin, &doc.raw).map(|_| ());
            if let Some(first) = seen.get(&doc.identifier) {
                if result.is_ok() {
                    result = Err(ParseError::DuplicateIdentifier {
                        identifier: doc.identifier.clone(),
                        first: first.clone(),
                        second: doc.origin.clone(),
                    });
                }
            } else {
                seen.insert(doc.identifier.clone(), doc.origin.clone());
            }
            diagnostics.push(DocumentDiagnostic {
                identifier: doc.identifier,
                origin: doc.origin,
                result,
            });
        }

        diagnostics.sort_by(|a, b| a.identifier.cmp(&b.identifier).then(a.origin.cmp(&b.origin)));
        Ok(diagnostics)
    }
}

impl Default for AgentParser {
    fn default() -> Self {
        Self::embedded()
    }
}

fn parse_catalog(source: &dyn CatalogSource) -> Result<Vec<Agent>, ParseError> {
    let documents = source.documents()?;
    let mut seen: HashMap<String, String> = HashMap::with_capacity(documents.len());
    let mut agents = Vec::with_capacity(documents.len());

    for doc in documents {
        let agent = parse_agent(&doc.identifier, &doc.origin, &doc.raw)?;
        if let Some(first) = seen.insert(agent.identifier.clone(), doc.origin.clone()) {
            return Err(ParseError::DuplicateIdentifier {
                identifier: agent.identifier,
                first,
                second: doc.origin,
            });
        }
        agents.push(agent);
    }

    agents.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(agents)
}
