//! Agent Catalog
//!
//! Parses the bundled agent definitions into typed records, caches the parsed set
//! for the life of the process, and answers filtering and aggregate queries over it.

pub mod catalog;
mod commands;
pub mod domain;
pub mod parser;
pub mod repository;

pub use catalog::{CatalogDocument, CatalogSource, DirectoryCatalog, EmbeddedCatalog, MemoryCatalog};
pub use commands::{
    AgentCommandService, AgentFilter, AgentListItem, AgentListResult, AgentShowResult,
    AgentValidateResult, CapabilitiesResult, ValidationEntry,
};
pub use domain::Agent;
pub use parser::{AgentParser, DocumentDiagnostic};
pub use repository::AgentRepository;
