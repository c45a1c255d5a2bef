//! Configuration provider trait

use super::settings::BrokerSettings;

/// Configuration provider abstraction
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory for testing
/// - `FileConfigProvider`: YAML file (~/.config/restbridge/config.yaml)
pub trait ConfigProvider: Send + Sync {
    /// Load settings; sources that hold nothing yield defaults
    fn load(&self) -> ConfigResult<BrokerSettings>;

    /// Persist settings
    fn save(&self, settings: &BrokerSettings) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
