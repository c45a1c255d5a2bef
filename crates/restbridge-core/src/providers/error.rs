//! Model backend error types

use thiserror::Error;

/// Errors that can occur while asking a model for a decision
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Missing API key
    #[error("API key is required for {provider}")]
    MissingApiKey { provider: String },

    /// The backend could not be reached or rejected the request
    #[error("{provider} request failed: {message}")]
    Backend { provider: String, message: String },

    /// The reply could not be interpreted
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// The reply asked for more than one function call
    #[error("{provider} requested {count} function calls; only one is supported")]
    MultipleFunctionCalls { provider: String, count: usize },
}

impl ProviderError {
    /// Create a missing API key error
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    /// Create a backend error
    pub fn backend(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
