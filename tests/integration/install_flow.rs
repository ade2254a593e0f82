use std::fs;
use std::sync::Arc;

use claude_agents::agent::{AgentParser, AgentRepository, MemoryCatalog};
use claude_agents::error::InstallError;
use claude_agents::install::{
    ConflictResolution, FixedResolver, FixedTargetLocator, InstallOptions, InstallService,
    InstallStatus, InstallSummary, InstallTarget, SkipReason, UninstallStatus,
};
use tempfile::TempDir;

fn repository() -> AgentRepository {
    let catalog = MemoryCatalog::new(vec![
        (
            "alpha",
            "---\nname: Alpha\ndescription: Shell automation\ntools: [bash]\n---\nAlpha body\n",
        ),
        (
            "beta",
            "---\nname: Beta\ndescription: Reads code\ntools: [read]\nmodel: opus\n---\nBeta body\n",
        ),
    ]);
    AgentRepository::new(Arc::new(AgentParser::new(Arc::new(catalog))))
}

fn service(temp: &TempDir) -> InstallService {
    InstallService::new(Arc::new(FixedTargetLocator::under(temp.path())))
}

#[test]
fn install_into_empty_directory_then_repeat_skips() {
    let temp = TempDir::new().unwrap();
    let agents = repository().load_agents().unwrap();
    let service = service(&temp);

    let first = service.install(&agents, InstallTarget::Local, InstallOptions::default());
    assert!(first
        .iter()
        .all(|r| matches!(r.status, InstallStatus::Installed)));
    let dir = service.target_dir(InstallTarget::Local).unwrap();
    assert_eq!(fs::read_to_string(dir.join("alpha.md")).unwrap(), "Alpha body\n");
    assert_eq!(fs::read_to_string(dir.join("beta.md")).unwrap(), "Beta body\n");

    let second = service.install(&agents, InstallTarget::Local, InstallOptions::default());
    assert!(second
        .iter()
        .all(|r| matches!(r.status, InstallStatus::Skipped(SkipReason::AlreadyExists))));
    assert_eq!(
        InstallSummary::from_results(&second),
        InstallSummary {
            skipped: 2,
            ..Default::default()
        }
    );
}

#[test]
fn overwrite_replaces_modified_files() {
    let temp = TempDir::new().unwrap();
    let agents = repository().load_agents().unwrap();
    let service = service(&temp);
    service.install(&agents, InstallTarget::Global, InstallOptions::default());

    let dir = service.target_dir(InstallTarget::Global).unwrap();
    fs::write(dir.join("alpha.md"), "local edits").unwrap();

    let results = service.install(
        &agents,
        InstallTarget::Global,
        InstallOptions {
            overwrite: true,
            interactive: false,
        },
    );
    assert!(results
        .iter()
        .all(|r| matches!(r.status, InstallStatus::Overwritten)));
    assert_eq!(fs::read_to_string(dir.join("alpha.md")).unwrap(), "Alpha body\n");
}

#[test]
fn interactive_decline_keeps_existing_file() {
    let temp = TempDir::new().unwrap();
    let agents = repository().load_agents().unwrap();
    let plain = service(&temp);
    plain.install(&agents[..1], InstallTarget::Local, InstallOptions::default());
    let dir = plain.target_dir(InstallTarget::Local).unwrap();
    fs::write(dir.join("alpha.md"), "keep me").unwrap();

    let asking = service(&temp).with_resolver(Arc::new(FixedResolver(ConflictResolution::Skip)));
    let results = asking.install(
        &agents,
        InstallTarget::Local,
        InstallOptions {
            overwrite: false,
            interactive: true,
        },
    );
    assert!(matches!(
        results[0].status,
        InstallStatus::Skipped(SkipReason::UserDeclined)
    ));
    assert!(matches!(results[1].status, InstallStatus::Installed));
    assert_eq!(fs::read_to_string(dir.join("alpha.md")).unwrap(), "keep me");
}

#[test]
fn uncreatable_target_fails_every_agent() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let service = InstallService::new(Arc::new(FixedTargetLocator {
        global: blocker.join("agents"),
        local: blocker.join("agents"),
    }));

    let agents = repository().load_agents().unwrap();
    let results = service.install(&agents, InstallTarget::Global, InstallOptions::default());
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| matches!(
        r.status,
        InstallStatus::Failed(InstallError::DirectoryCreationFailed { .. })
    )));
    assert!(!blocker.join("agents").exists());
}

#[test]
fn update_and_uninstall_round_trip() {
    let temp = TempDir::new().unwrap();
    let agents = repository().load_agents().unwrap();
    let service = service(&temp);
    service.install(&agents[..1], InstallTarget::Local, InstallOptions::default());

    let dir = service.target_dir(InstallTarget::Local).unwrap();
    fs::write(dir.join("alpha.md"), "stale").unwrap();

    let updated = service.update(&agents, InstallTarget::Local);
    assert!(matches!(updated[0].status, InstallStatus::Overwritten));
    assert!(matches!(
        updated[1].status,
        InstallStatus::Skipped(SkipReason::NotInstalled)
    ));
    assert_eq!(fs::read_to_string(dir.join("alpha.md")).unwrap(), "Alpha body\n");

    let installed = service.installed(&agents, InstallTarget::Local).unwrap();
    assert_eq!(installed.into_iter().collect::<Vec<_>>(), vec!["alpha".to_string()]);

    let removed = service.uninstall(
        &["alpha".to_string(), "beta".to_string()],
        InstallTarget::Local,
    );
    assert!(matches!(removed[0].status, UninstallStatus::Removed));
    assert!(matches!(removed[1].status, UninstallStatus::NotInstalled));
    assert!(!dir.join("alpha.md").exists());
}
