//! Catalog sources: where raw agent documents come from.
//!
//! The parser only needs an enumeration of `(identifier, raw text)` pairs, so the
//! packaging of those documents is a port with three adapters: the documents
//! compiled into the binary, a directory on disk, and an in-memory set.

pub mod directory;
pub mod embedded;

use crate::error::ParseError;
use std::path::Path;

pub use directory::DirectoryCatalog;
pub use embedded::EmbeddedCatalog;

/// One raw agent document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocument {
    /// Document stem, used as the agent identifier
    pub identifier: String,
    /// Human-readable origin for diagnostics (file path or `embedded:<file>`)
    pub origin: String,
    pub raw: String,
}

impl CatalogDocument {
    pub fn new(identifier: impl Into<String>, origin: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            origin: origin.into(),
            raw: raw.into(),
        }
    }
}

/// Enumerates the raw documents of an agent catalog.
pub trait CatalogSource: Send + Sync {
    fn documents(&self) -> Result<Vec<CatalogDocument>, ParseError>;

    /// Short description of the source for logs and CLI output.
    fn describe(&self) -> String;
}

/// Derive the identifier for a document from its file name (`foo.md` → `foo`).
pub fn identifier_from_file_name(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// In-memory catalog built from `(identifier, raw)` pairs.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    documents: Vec<CatalogDocument>,
}

impl MemoryCatalog {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let documents = pairs
            .into_iter()
            .map(|(identifier, raw)| {
                let identifier = identifier.into();
                let origin = format!("memory:{}", identifier);
                CatalogDocument::new(identifier, origin, raw)
            })
            .collect();
        Self { documents }
    }
}

impl CatalogSource for MemoryCatalog {
    fn documents(&self) -> Result<Vec<CatalogDocument>, ParseError> {
        Ok(self.documents.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} documents)", self.documents.len())
    }
}
