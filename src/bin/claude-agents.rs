//! claude-agents CLI Binary
//!
//! Command-line interface for browsing and installing agent definitions.

use clap::Parser;
use claude_agents::logging::init_logging;
use claude_agents::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let workspace = match dunce::canonicalize(&cli.workspace) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: workspace {} not found: {}", cli.workspace.display(), e);
            process::exit(1);
        }
    };

    let config = match CliContext::load_config(&workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging), &cli.logging_overrides()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::with_config(workspace, config, cli.catalog.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text);
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
