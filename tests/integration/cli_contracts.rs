use std::fs;
use std::path::{Path, PathBuf};

use claude_agents::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

/// Config that keeps both install targets and the catalog inside `root`.
fn write_config(root: &Path, catalog: Option<&Path>) -> PathBuf {
    let mut body = format!(
        "[install]\ndefault_target = \"local\"\nglobal_dir = {:?}\nlocal_dir = {:?}\n",
        root.join("global").display().to_string(),
        root.join("local").display().to_string(),
    );
    if let Some(dir) = catalog {
        body.push_str(&format!(
            "\n[catalog]\ndirectory = {:?}\n",
            dir.display().to_string()
        ));
    }
    let path = root.join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn capabilities_json_contract_has_sorted_sections() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), None);
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config), None).unwrap();

    let output = cli
        .execute(&Commands::Capabilities {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let models: Vec<&str> = parsed["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["haiku", "opus", "sonnet"]);
    assert!(parsed["tools"].as_array().is_some());
    assert!(parsed["mcp_servers"].as_array().is_some());
}

#[test]
fn validate_reports_invalid_documents_and_fails() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("catalog");
    fs::create_dir_all(&catalog).unwrap();
    fs::write(catalog.join("good.md"), "---\ndescription: ok\n---\n").unwrap();
    fs::write(catalog.join("nodesc.md"), "---\nname: x\n---\n").unwrap();
    let config = write_config(temp.path(), Some(&catalog));
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config), None).unwrap();

    let output = cli
        .execute(&Commands::Validate {
            format: "json".to_string(),
        })
        .unwrap();
    assert!(!output.success);
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["valid"], false);
    assert_eq!(parsed["documents"].as_array().unwrap().len(), 2);
}

#[test]
fn catalog_flag_overrides_configured_directory() {
    let temp = TempDir::new().unwrap();
    let configured = temp.path().join("configured");
    let flagged = temp.path().join("flagged");
    fs::create_dir_all(&configured).unwrap();
    fs::create_dir_all(&flagged).unwrap();
    fs::write(configured.join("one.md"), "---\ndescription: one\n---\n").unwrap();
    fs::write(flagged.join("two.md"), "---\ndescription: two\n---\n").unwrap();
    let config = write_config(temp.path(), Some(&configured));

    let cli = CliContext::new(temp.path().to_path_buf(), Some(config), Some(flagged)).unwrap();
    let agents = cli.repository().load_agents().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].identifier, "two");
}

#[test]
fn install_all_force_then_update_reports_up_to_date() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), None);
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config), None).unwrap();

    let install = cli
        .execute(&Commands::Install {
            names: vec![],
            global: false,
            local: false,
            all: true,
            force: true,
        })
        .unwrap();
    assert!(install.success);
    assert!(temp.path().join("local/swift-architect.md").is_file());
    assert!(!temp.path().join("global").exists());

    let update = cli
        .execute(&Commands::Update {
            global: false,
            local: false,
        })
        .unwrap();
    assert!(update.success);
    assert!(update.text.contains("up to date"));
    assert!(!update.text.contains("Overwritten:"));

    let removed = cli
        .execute(&Commands::Uninstall {
            names: vec![],
            global: false,
            local: true,
            all: true,
            yes: true,
        })
        .unwrap();
    assert!(removed.success);
    assert!(!temp.path().join("local/swift-architect.md").exists());
}
