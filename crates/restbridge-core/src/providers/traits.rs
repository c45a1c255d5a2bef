//! Model backend trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::types::FunctionDeclaration;
use super::error::ProviderResult;

/// One prompt plus the tools the model may call
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Model identifier as used by the backend's API
    pub model: String,
    /// The user's prompt, sent as the only message
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Function declarations; may be empty
    pub tools: Vec<FunctionDeclaration>,
}

impl ModelRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: crate::config::DEFAULT_TEMPERATURE,
            tools: Vec::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.tools = tools;
        self
    }
}

/// A function-call part of a model reply, arguments untouched
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallPart {
    pub name: String,
    pub arguments: Value,
}

impl FunctionCallPart {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// The actionable parts of the first candidate of a model reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    /// Text parts, in order
    pub texts: Vec<String>,
    /// Function-call parts, in order
    pub function_calls: Vec<FunctionCallPart>,
}

impl ModelReply {
    /// A reply with a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            function_calls: Vec::new(),
        }
    }

    /// A reply with a single function-call part
    pub fn function_call(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            texts: Vec::new(),
            function_calls: vec![FunctionCallPart::new(name, arguments)],
        }
    }

    /// A reply with no parts at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_function_call(mut self, name: impl Into<String>, arguments: Value) -> Self {
        self.function_calls.push(FunctionCallPart::new(name, arguments));
        self
    }
}

/// A language model that can answer a prompt or pick a function to call
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Backend name used in logs and errors (e.g., "gemini")
    fn name(&self) -> &str;

    /// Send one request and return the reply's actionable parts
    async fn generate(&self, request: ModelRequest) -> ProviderResult<ModelReply>;
}
