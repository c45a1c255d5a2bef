//! GenaiBackend - Gemini model backend using the genai crate

use async_trait::async_trait;
use std::sync::Arc;

use crate::logging::Logger;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{create_client, from_chat_response, to_chat_options, to_chat_request};
use super::traits::{ModelBackend, ModelReply, ModelRequest};

/// Model backend that talks to Gemini through genai
pub struct GenaiBackend {
    /// API key; a blank key counts as missing
    api_key: Option<String>,
    /// Logger for debug output
    logger: Arc<dyn Logger>,
}

impl GenaiBackend {
    /// Create a new GenaiBackend
    pub fn new(api_key: Option<String>, logger: Arc<dyn Logger>) -> Self {
        Self { api_key, logger }
    }

    fn api_key(&self) -> ProviderResult<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::missing_api_key(self.name()))
    }
}

#[async_trait]
impl ModelBackend for GenaiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: ModelRequest) -> ProviderResult<ModelReply> {
        let api_key = self.api_key()?;
        let client = create_client(api_key);

        self.logger.debug(&format!(
            "[GenaiBackend] exec_chat: model={}, temperature={}, tools={}",
            request.model,
            request.temperature,
            request.tools.len()
        ));

        let chat_req = to_chat_request(&request);
        let options = to_chat_options(&request);

        let response = client
            .exec_chat(request.model.as_str(), chat_req, Some(&options))
            .await
            .map_err(|e| {
                self.logger.error(&format!("[GenaiBackend] exec_chat failed: {}", e));
                ProviderError::backend(self.name(), e.to_string())
            })?;

        let reply = from_chat_response(&response);
        self.logger.debug(&format!(
            "[GenaiBackend] reply: {} text part(s), {} function call(s)",
            reply.texts.len(),
            reply.function_calls.len()
        ));

        Ok(reply)
    }
}
