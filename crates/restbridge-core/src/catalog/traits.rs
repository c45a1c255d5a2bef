//! Client-side seams of the tool catalog

use async_trait::async_trait;

use crate::types::{ToolArguments, ToolDescriptor, ToolInvocationResult};

use super::error::CatalogResult;

/// An open connection to a tool catalog
///
/// A connection belongs to one session. `close` consumes it so a closed
/// catalog cannot be used again.
#[async_trait]
pub trait ToolCatalog: Send + Sync {
    /// Enumerate the registered operations
    async fn list_tools(&self) -> CatalogResult<Vec<ToolDescriptor>>;

    /// Run a named operation
    ///
    /// Protocol failures are errors. Failures of the operation itself come
    /// back in the result payload.
    async fn call_tool(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> CatalogResult<ToolInvocationResult>;

    /// Tear the connection down
    async fn close(self: Box<Self>) -> CatalogResult<()>;
}

/// Opens catalog connections, one per session
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    async fn connect(&self) -> CatalogResult<Box<dyn ToolCatalog>>;
}
