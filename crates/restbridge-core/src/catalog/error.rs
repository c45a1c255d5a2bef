//! Tool catalog errors

use thiserror::Error;

/// Errors raised at the catalog protocol boundary
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
