//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::AgentsConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, the workspace file and environment.
    pub fn load(workspace_root: &Path) -> Result<AgentsConfig, ConfigError> {
        MergeService::load(workspace_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<AgentsConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> AgentsConfig {
        AgentsConfig::default()
    }

    /// Render configuration as TOML.
    pub fn to_toml(config: &AgentsConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::InstallTarget;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[install]\ndefault_target = \"local\"\nglobal_dir = \"/opt/agents\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.install.default_target, InstallTarget::Local);
        assert_eq!(
            config.install.global_dir.as_deref(),
            Some(Path::new("/opt/agents"))
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "text");
        assert!(config.catalog.directory.is_none());
    }

    #[test]
    fn test_workspace_file_is_merged() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(crate::config::WORKSPACE_CONFIG_FILE),
            "[catalog]\ndirectory = \"agents-src\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(
            config.catalog.directory.as_deref(),
            Some(Path::new("agents-src"))
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLoader::load_from_file(&temp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = ConfigLoader::default();
        config.install.default_target = InstallTarget::Local;
        let rendered = ConfigLoader::to_toml(&config).unwrap();
        assert!(rendered.contains("default_target = \"local\""));
        let parsed: AgentsConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.install.default_target, InstallTarget::Local);
    }
}
