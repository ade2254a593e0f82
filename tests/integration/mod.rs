//! Integration tests for the agent catalog and installer

mod catalog_loading;
mod cli_contracts;
mod install_flow;
