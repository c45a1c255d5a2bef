//! File-based configuration provider (YAML)
//!
//! Default location is the user-level `~/.config/restbridge/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::BrokerSettings;
use super::traits::{ConfigProvider, ConfigResult};

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use restbridge_core::config::{ConfigProvider, FileConfigProvider};
///
/// let settings = FileConfigProvider::user().load()?;
/// # Ok::<(), restbridge_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level config provider (~/.config/restbridge/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("restbridge").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> ConfigResult<BrokerSettings> {
        if !self.exists() {
            return Ok(BrokerSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BrokerSettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, settings: &BrokerSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(settings)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogCommand, ConfigError};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        assert_eq!(provider.load().unwrap(), BrokerSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let provider = FileConfigProvider::new(&path);

        let settings = BrokerSettings::default()
            .with_model("gemini-1.5-flash")
            .with_catalog(CatalogCommand::new("restbridge").with_args(["serve"]));
        provider.save(&settings).unwrap();

        assert!(provider.exists());
        assert_eq!(provider.load().unwrap(), settings);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("gemini-1.5-flash"));
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "temperature: [not a number").unwrap();

        let provider = FileConfigProvider::new(&path);
        assert!(matches!(provider.load(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_user_path() {
        let provider = FileConfigProvider::user();
        assert!(provider.path().ends_with("restbridge/config.yaml"));
    }
}
