use std::fs;
use std::sync::Arc;

use claude_agents::agent::{AgentParser, AgentRepository, DirectoryCatalog};
use claude_agents::error::ParseError;
use tempfile::TempDir;

fn directory_repository(temp: &TempDir) -> AgentRepository {
    AgentRepository::new(Arc::new(AgentParser::new(Arc::new(DirectoryCatalog::new(
        temp.path(),
    )))))
}

#[test]
fn bundled_catalog_answers_queries() {
    let repo = AgentRepository::embedded();
    let agents = repo.load_agents().unwrap();
    assert!(agents.len() >= 5);

    let ids: Vec<&str> = agents.iter().map(|a| a.identifier.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    let opus: Vec<String> = repo
        .by_model("OPUS")
        .unwrap()
        .into_iter()
        .map(|a| a.identifier)
        .collect();
    assert_eq!(opus, vec!["swift-architect".to_string()]);

    let github = repo.by_mcp_server("github").unwrap();
    assert_eq!(github.len(), 1);
    assert_eq!(github[0].identifier, "github-workflow");

    let testing = repo.get_agent("testing-specialist").unwrap().unwrap();
    assert!(testing.uses_tool("Edit"));
    assert!(testing.content.starts_with("\n# Testing Specialist"));

    assert!(repo.all_mcp_servers().unwrap().contains("gitlab"));
}

#[test]
fn directory_catalog_ignores_non_markdown_files() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("alpha.md"),
        "---\ndescription: Shell automation\ntools: [bash]\n---\nbody\n",
    )
    .unwrap();
    fs::write(temp.path().join("notes.txt"), "not an agent").unwrap();
    fs::create_dir(temp.path().join("nested")).unwrap();
    fs::write(
        temp.path().join("nested/hidden.md"),
        "---\ndescription: nested\n---\n",
    )
    .unwrap();

    let agents = directory_repository(&temp).load_agents().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].identifier, "alpha");
    assert_eq!(agents[0].content, "body\n");
}

#[test]
fn one_bad_document_fails_the_whole_load_but_diagnose_reports_each() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("good.md"), "---\ndescription: ok\n---\n").unwrap();
    fs::write(temp.path().join("bad.md"), "no header here\n").unwrap();

    let repo = directory_repository(&temp);
    let err = repo.load_agents().unwrap_err();
    assert!(matches!(err, ParseError::InvalidFormat { .. }));
    assert!(!repo.parser().is_cached());

    let diagnostics = repo.parser().diagnose().unwrap();
    assert_eq!(diagnostics.len(), 2);
    let bad = diagnostics.iter().find(|d| d.identifier == "bad").unwrap();
    assert!(!bad.is_valid());
    let good = diagnostics.iter().find(|d| d.identifier == "good").unwrap();
    assert!(good.is_valid());
}

#[test]
fn clear_cache_picks_up_new_documents() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("alpha.md"), "---\ndescription: a\n---\n").unwrap();

    let repo = directory_repository(&temp);
    assert_eq!(repo.load_agents().unwrap().len(), 1);

    fs::write(temp.path().join("beta.md"), "---\ndescription: b\n---\n").unwrap();
    assert_eq!(repo.load_agents().unwrap().len(), 1);

    repo.clear_cache();
    assert_eq!(repo.load_agents().unwrap().len(), 2);
}

#[test]
fn missing_catalog_directory_is_reported() {
    let temp = TempDir::new().unwrap();
    let repo = AgentRepository::new(Arc::new(AgentParser::new(Arc::new(DirectoryCatalog::new(
        temp.path().join("absent"),
    )))));
    assert!(matches!(
        repo.load_agents().unwrap_err(),
        ParseError::FileNotFound(_)
    ));
}
