//! Broker settings

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Environment variable holding the model API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Argument that makes the `restbridge` binary run the catalog server
pub const SERVE_ARG: &str = "serve";

/// How to start the tool catalog process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCommand {
    /// Program to execute
    pub program: String,
    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables; the broker's own environment is inherited
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl CatalogCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// The currently running executable with the `serve` argument
    pub fn current_exe() -> std::io::Result<Self> {
        let exe: PathBuf = std::env::current_exe()?;
        Ok(Self::new(exe.to_string_lossy().into_owned()).with_args([SERVE_ARG]))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Settings for one broker run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSettings {
    /// Model identifier sent to the backend
    pub model: String,
    /// Sampling temperature (0.0 - 2.0 expected, not enforced)
    pub temperature: f64,
    /// Environment variable (or provider alias) for the API key
    pub api_key_env: String,
    /// Catalog process; `None` means "this executable, `serve` subcommand"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogCommand>,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            catalog: None,
        }
    }
}

impl BrokerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_catalog(mut self, command: CatalogCommand) -> Self {
        self.catalog = Some(command);
        self
    }
}
