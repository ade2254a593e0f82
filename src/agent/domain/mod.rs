pub mod agent;
pub mod document;

pub use agent::Agent;
pub use document::{parse_agent, split_document};
