//! Format catalog, install and validation results as text or JSON.

use crate::agent::{
    AgentListResult, AgentShowResult, AgentValidateResult, CapabilitiesResult,
};
use crate::install::{
    InstallResult, InstallStatus, InstallSummary, InstallTarget, UninstallResult, UninstallStatus,
};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::{OwoColorize, Stream, Style};
use serde_json::json;
use std::path::Path;

/// Format a section heading with bold/underline when stdout takes colors.
pub fn format_section_heading(title: &str) -> String {
    let style = Style::new().bold().underline();
    format!("{}", title.if_supports_color(Stream::Stdout, |t| t.style(style)))
}

fn green(word: &str) -> String {
    word.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
}

fn yellow(word: &str) -> String {
    word.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
}

fn red(word: &str) -> String {
    word.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
}

fn join_or_dash<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn to_pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Format agent list result as text
pub fn format_agent_list_text(result: &AgentListResult) -> String {
    if result.agents.is_empty() {
        return "No agents found.".to_string();
    }
    let show_installed = result.agents.iter().any(|a| a.installed.is_some());

    let mut header = vec!["Agent", "Model", "Tools", "MCP", "Description"];
    if show_installed {
        header.push("Installed");
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header);
    for item in &result.agents {
        let mut row = vec![
            item.identifier.clone(),
            item.model.clone().unwrap_or_else(|| "-".to_string()),
            join_or_dash(&item.tools),
            join_or_dash(&item.mcp),
            item.description.clone(),
        ];
        if let Some(installed) = item.installed {
            row.push(if installed { "yes" } else { "no" }.to_string());
        }
        table.add_row(row);
    }

    let mut out = format!("{}\n\n", format_section_heading("Available Agents"));
    out.push_str(&format!("{}\n\nTotal: {} agent(s)", table, result.agents.len()));
    out
}

/// Format agent list result as JSON
pub fn format_agent_list_json(result: &AgentListResult) -> String {
    to_pretty_json(&json!({
        "agents": result.agents,
        "total": result.agents.len(),
    }))
}

/// Format agent show result as text
pub fn format_agent_show_text(result: &AgentShowResult) -> String {
    let agent = &result.agent;
    let mut out = format!("{}\n", format_section_heading(&format!("Agent: {}", agent.identifier)));
    out.push_str(&format!("Name: {}\n", agent.name));
    out.push_str(&format!("Description: {}\n", agent.description));
    out.push_str(&format!(
        "Model: {}\n",
        agent.model.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Tools: {}\n", join_or_dash(&agent.tools)));
    out.push_str(&format!("MCP servers: {}\n", join_or_dash(&agent.integrations)));
    out.push_str(&format!("Source: {}\n", agent.source));
    if result.include_content {
        out.push('\n');
        out.push_str(&agent.content);
    }
    out
}

/// Format agent show result as JSON
pub fn format_agent_show_json(result: &AgentShowResult) -> String {
    let mut out = json!(result.agent);
    out["source"] = json!(result.agent.source);
    if result.include_content {
        out["content"] = json!(result.agent.content);
    }
    to_pretty_json(&out)
}

pub fn format_capabilities_text(result: &CapabilitiesResult) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("Tools", &result.tools),
        ("Models", &result.models),
        ("MCP servers", &result.mcp_servers),
    ] {
        out.push_str(&format!("{}\n", format_section_heading(title)));
        if values.is_empty() {
            out.push_str("  (none)\n");
        }
        for value in values {
            out.push_str(&format!("  {}\n", value));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn format_capabilities_json(result: &CapabilitiesResult) -> String {
    to_pretty_json(&json!(result))
}

/// Format validation results as text
pub fn format_validation_text(result: &AgentValidateResult) -> String {
    if result.entries.is_empty() {
        return "No agent documents found to validate.".to_string();
    }
    let mut out = format!("{}\n\n", format_section_heading("Agent Validation"));
    for entry in &result.entries {
        match &entry.error {
            None => out.push_str(&format!("  {} {}\n", green("ok"), entry.identifier)),
            Some(err) => out.push_str(&format!(
                "  {} {} ({})\n      {}\n",
                red("error"),
                entry.identifier,
                entry.origin,
                err
            )),
        }
    }
    out.push_str(&format!(
        "\n{} document(s), {} invalid",
        result.entries.len(),
        result.invalid_count()
    ));
    out
}

pub fn format_validation_json(result: &AgentValidateResult) -> String {
    to_pretty_json(&json!({
        "valid": result.is_valid(),
        "documents": result.entries,
    }))
}

fn format_summary(summary: &InstallSummary) -> String {
    let mut out = format!("{}\n", format_section_heading("Summary"));
    for (label, count) in [
        ("Installed", summary.installed),
        ("Overwritten", summary.overwritten),
        ("Skipped", summary.skipped),
        ("Failed", summary.failed),
    ] {
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }
    out
}

/// Format per-agent install or update outcomes followed by a summary.
pub fn format_install_results(
    results: &[InstallResult],
    target: InstallTarget,
    target_dir: &Path,
) -> String {
    let mut out = format!(
        "Processing {} agent(s) for {} location...\nTarget: {}\n\n",
        results.len(),
        target.display_name(),
        target_dir.display()
    );
    for result in results {
        let id = &result.agent.identifier;
        let line = match &result.status {
            InstallStatus::Installed => format!("  {} {}", green("installed"), id),
            InstallStatus::Overwritten => format!("  {} {}", green("overwritten"), id),
            InstallStatus::Skipped(reason) => {
                format!("  {} {} - {}", yellow("skipped"), id, reason)
            }
            InstallStatus::Failed(err) => format!("  {} {} - {}", red("failed"), id, err),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format_summary(&InstallSummary::from_results(results)));
    out.trim_end().to_string()
}

pub fn format_uninstall_results(results: &[UninstallResult]) -> String {
    let mut out = String::new();
    let mut removed = 0;
    for result in results {
        let line = match &result.status {
            UninstallStatus::Removed => {
                removed += 1;
                format!("  {} {}", green("removed"), result.identifier)
            }
            UninstallStatus::NotInstalled => {
                format!("  {} {} - not installed", yellow("skipped"), result.identifier)
            }
            UninstallStatus::Failed(err) => {
                format!("  {} {} - {}", red("failed"), result.identifier, err)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nRemoved {} of {} agent(s)", removed, results.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentListItem, ValidationEntry};
    use crate::error::InstallError;
    use crate::agent::Agent;
    use crate::install::SkipReason;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn agent(id: &str) -> Agent {
        Agent {
            identifier: id.to_string(),
            name: id.to_string(),
            description: format!("{} agent", id),
            tools: ["bash".to_string()].into_iter().collect(),
            model: None,
            integrations: BTreeSet::new(),
            content: "Body\n".to_string(),
            source: format!("memory:{}", id),
        }
    }

    #[test]
    fn test_list_text_includes_installed_column_only_when_marked() {
        let item = AgentListItem {
            identifier: "alpha".to_string(),
            description: "Shell".to_string(),
            model: Some("opus".to_string()),
            tools: ["bash".to_string()].into_iter().collect(),
            mcp: BTreeSet::new(),
            installed: None,
        };
        let plain = format_agent_list_text(&AgentListResult {
            agents: vec![item.clone()],
        });
        assert!(plain.contains("alpha"));
        assert!(!plain.contains("Installed"));

        let marked = format_agent_list_text(&AgentListResult {
            agents: vec![AgentListItem {
                installed: Some(true),
                ..item
            }],
        });
        assert!(marked.contains("Installed"));
        assert!(marked.contains("yes"));
    }

    #[test]
    fn test_list_json_shape() {
        let out = format_agent_list_json(&AgentListResult { agents: vec![] });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 0);
    }

    #[test]
    fn test_show_json_content_is_optional() {
        let hidden = format_agent_show_json(&AgentShowResult {
            agent: agent("alpha"),
            include_content: false,
        });
        let value: serde_json::Value = serde_json::from_str(&hidden).unwrap();
        assert!(value.get("content").is_none());
        assert_eq!(value["source"], "memory:alpha");

        let shown = format_agent_show_json(&AgentShowResult {
            agent: agent("alpha"),
            include_content: true,
        });
        let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(value["content"], "Body\n");
    }

    #[test]
    fn test_install_results_summary_counts() {
        let results = vec![
            InstallResult {
                agent: agent("alpha"),
                destination: PathBuf::from("/t/alpha.md"),
                status: InstallStatus::Installed,
            },
            InstallResult {
                agent: agent("beta"),
                destination: PathBuf::from("/t/beta.md"),
                status: InstallStatus::Skipped(SkipReason::AlreadyExists),
            },
            InstallResult {
                agent: agent("gamma"),
                destination: PathBuf::from("/t/gamma.md"),
                status: InstallStatus::Failed(InstallError::PermissionDenied(PathBuf::from(
                    "/t/gamma.md",
                ))),
            },
        ];
        let out = format_install_results(&results, InstallTarget::Local, Path::new("/t"));
        assert!(out.contains("already exists"));
        assert!(out.contains("Installed: 1"));
        assert!(out.contains("Skipped: 1"));
        assert!(out.contains("Failed: 1"));
        assert!(!out.contains("Overwritten:"));
    }

    #[test]
    fn test_validation_json_reports_overall_validity() {
        let result = AgentValidateResult {
            entries: vec![ValidationEntry {
                identifier: "broken".to_string(),
                origin: "memory:broken".to_string(),
                valid: false,
                error: Some("missing description".to_string()),
            }],
        };
        let value: serde_json::Value =
            serde_json::from_str(&format_validation_json(&result)).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["documents"][0]["identifier"], "broken");
    }

    #[test]
    fn test_status_words_are_plain_without_color_support() {
        owo_colors::set_override(false);
        let results = vec![InstallResult {
            agent: agent("alpha"),
            destination: PathBuf::from("/t/alpha.md"),
            status: InstallStatus::Overwritten,
        }];
        let out = format_install_results(&results, InstallTarget::Global, Path::new("/t"));
        assert!(out.contains("  overwritten alpha"));
        assert!(out.contains("Summary"));
        assert!(!out.contains('\x1b'));
        owo_colors::unset_override();
    }
}
