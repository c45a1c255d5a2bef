//! restbridge core
//!
//! Lets a language model call arbitrary REST endpoints through a tool catalog
//! process. The catalog exposes one MCP tool, `call_rest_api`, and the broker
//! asks the model whether to answer a prompt directly or call that tool.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use restbridge_core::{Broker, CatalogCommand, ChildProcessConnector, GenaiBackend, TracingLogger};
//!
//! let logger = Arc::new(TracingLogger::new());
//! let connector = ChildProcessConnector::new(CatalogCommand::current_exe()?, logger.clone());
//! let backend = GenaiBackend::new(Some(api_key), logger.clone());
//!
//! let broker = Broker::new(Arc::new(connector), Arc::new(backend), logger);
//! let report = broker.run("get the weather for Paris").await?;
//! println!("{}", report);
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod http;
pub mod schema;
pub mod catalog;
pub mod providers;
pub mod broker;

// Re-export commonly used types
pub use types::{
    FunctionCall, FunctionDeclaration, ModelDecision, ToolArguments, ToolDescriptor,
    ToolInvocationResult,
};

pub use secrets::{EnvSecretStore, MemorySecretStore, SecretStore, SecretStoreError, SecretStoreResult};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{
    BrokerSettings, CatalogCommand, ConfigError, ConfigProvider, FileConfigProvider,
    MemoryConfigProvider,
};

pub use http::{invoke, RestCall};

pub use schema::{translate, validate_arguments};

pub use catalog::{
    CatalogConnector, CatalogError, ChildProcessConnector, McpClient, RestCatalogServer,
    ToolCatalog,
};

pub use providers::{GenaiBackend, ModelBackend, ProviderError};

pub use broker::{Broker, BrokerError, BrokerResult, SessionFailure, SessionHeader, SessionReport};
