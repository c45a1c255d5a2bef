//! Configuration
//!
//! Supports multiple configuration sources:
//! - `MemoryConfigProvider`: In-memory for testing
//! - `FileConfigProvider`: YAML file-based

mod file;
mod memory;
mod settings;
mod traits;

pub use file::FileConfigProvider;
pub use memory::MemoryConfigProvider;
pub use settings::{
    BrokerSettings, CatalogCommand, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    SERVE_ARG,
};
pub use traits::{ConfigError, ConfigProvider, ConfigResult};
