//! In-memory configuration provider

use parking_lot::RwLock;

use super::settings::BrokerSettings;
use super::traits::{ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    settings: RwLock<BrokerSettings>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: BrokerSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn load(&self) -> ConfigResult<BrokerSettings> {
        Ok(self.settings.read().clone())
    }

    fn save(&self, settings: &BrokerSettings) -> ConfigResult<()> {
        *self.settings.write() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_provider() {
        let config = MemoryConfigProvider::new();
        assert_eq!(config.load().unwrap(), BrokerSettings::default());

        let custom = BrokerSettings::default().with_temperature(0.7);
        config.save(&custom).unwrap();
        assert_eq!(config.load().unwrap().temperature, 0.7);
    }
}
