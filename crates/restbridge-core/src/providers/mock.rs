//! Mock model backend for testing
//!
//! Returns scripted replies without network access and records every request.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ModelBackend, ModelReply, ModelRequest};
use crate::logging::Logger;

/// Mock response mode
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return the same reply to every request
    Fixed(ModelReply),
    /// Fail every request as a backend error
    Error(String),
    /// Fail every request as if no API key had been configured
    MissingKey,
}

/// Mock model backend
#[derive(Clone)]
pub struct MockBackend {
    mode: MockMode,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
    logger: Arc<dyn Logger>,
}

impl MockBackend {
    pub fn with_mode(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode,
            requests: Arc::new(Mutex::new(Vec::new())),
            logger,
        }
    }

    /// Create a fixed reply backend
    pub fn fixed(reply: ModelReply, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(reply), logger)
    }

    /// Create an error-producing backend
    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Error(message.into()), logger)
    }

    /// Create a backend without credentials
    pub fn missing_key(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::MissingKey, logger)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: ModelRequest) -> ProviderResult<ModelReply> {
        self.logger.debug(&format!(
            "[MockBackend] generate: model={}, tools={}",
            request.model,
            request.tools.len()
        ));
        self.requests.lock().push(request);

        match &self.mode {
            MockMode::Fixed(reply) => Ok(reply.clone()),
            MockMode::Error(message) => Err(ProviderError::backend(self.name(), message.clone())),
            MockMode::MissingKey => Err(ProviderError::missing_api_key(self.name())),
        }
    }
}
