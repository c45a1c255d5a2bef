//! Session-terminating broker errors

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::providers::ProviderError;
use crate::schema::ArgumentError;

use super::render::SessionHeader;

/// Why a session ended without a report
///
/// Every variant is terminal for the session and none is retried.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("could not reach the tool catalog: {0}")]
    CatalogUnreachable(#[source] CatalogError),

    #[error("model unavailable: {0}")]
    ModelUnavailable(#[source] ProviderError),

    #[error("error executing function call: {0}")]
    ToolExecutionFailed(#[source] CatalogError),

    #[error("model requested unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for '{name}': {source}")]
    InvalidArguments {
        name: String,
        #[source]
        source: ArgumentError,
    },

    #[error("model requested {count} function calls; only one per prompt is supported")]
    AmbiguousDecision { count: usize },
}

impl From<ProviderError> for BrokerError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MultipleFunctionCalls { count, .. } => Self::AmbiguousDecision { count },
            other => Self::ModelUnavailable(other),
        }
    }
}

pub type BrokerResult<T> = Result<T, BrokerError>;

/// A failed session together with how far it got
///
/// `header` is set once the catalog was listed, so a front end can show the
/// question and catalog size before the error.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct SessionFailure {
    pub header: Option<SessionHeader>,
    #[source]
    pub error: BrokerError,
}

impl SessionFailure {
    pub fn new(header: Option<SessionHeader>, error: BrokerError) -> Self {
        Self { header, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_calls_become_ambiguous() {
        let err: BrokerError = ProviderError::MultipleFunctionCalls {
            provider: "mock".to_string(),
            count: 3,
        }
        .into();
        assert!(matches!(err, BrokerError::AmbiguousDecision { count: 3 }));
    }

    #[test]
    fn test_other_provider_errors_are_model_unavailable() {
        let err: BrokerError = ProviderError::missing_api_key("gemini").into();
        assert!(matches!(err, BrokerError::ModelUnavailable(_)));
        assert_eq!(
            err.to_string(),
            "model unavailable: API key is required for gemini"
        );
    }

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(
            BrokerError::UnknownTool("delete_everything".to_string()).to_string(),
            "model requested unknown tool 'delete_everything'"
        );
        let err = BrokerError::InvalidArguments {
            name: "call_rest_api".to_string(),
            source: ArgumentError::MissingRequired("url".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "invalid arguments for 'call_rest_api': missing required argument 'url'"
        );
    }
}
