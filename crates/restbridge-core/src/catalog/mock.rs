//! Mock tool catalog for testing
//!
//! Serves a fixed tool list and scripted call results without spawning a
//! process. Clones share their call log, so a test can keep one handle while
//! the broker consumes another.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::{FunctionCall, ToolArguments, ToolDescriptor, ToolInvocationResult};

use super::error::{CatalogError, CatalogResult};
use super::traits::{CatalogConnector, ToolCatalog};

/// Scripted catalog acting as both connector and connection
#[derive(Clone, Default)]
pub struct MockCatalog {
    tools: Vec<ToolDescriptor>,
    results: HashMap<String, Result<ToolInvocationResult, String>>,
    connect_error: Option<String>,
    list_error: Option<String>,
    calls: Arc<Mutex<Vec<FunctionCall>>>,
    connects: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool together with the result its calls return
    pub fn with_tool(mut self, tool: ToolDescriptor, result: ToolInvocationResult) -> Self {
        self.results.insert(tool.name.clone(), Ok(result));
        self.tools.push(tool);
        self
    }

    /// Register a tool whose calls fail at the protocol level
    pub fn with_failing_tool(mut self, tool: ToolDescriptor, message: impl Into<String>) -> Self {
        self.results.insert(tool.name.clone(), Err(message.into()));
        self.tools.push(tool);
        self
    }

    /// Make `connect` fail
    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.connect_error = Some(message.into());
        self
    }

    /// Make `list_tools` fail
    pub fn failing_list(mut self, message: impl Into<String>) -> Self {
        self.list_error = Some(message.into());
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<FunctionCall> {
        self.calls.lock().clone()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogConnector for MockCatalog {
    async fn connect(&self) -> CatalogResult<Box<dyn ToolCatalog>> {
        if let Some(message) = &self.connect_error {
            return Err(CatalogError::ConnectionFailed(message.clone()));
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl ToolCatalog for MockCatalog {
    async fn list_tools(&self) -> CatalogResult<Vec<ToolDescriptor>> {
        match &self.list_error {
            Some(message) => Err(CatalogError::Protocol(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> CatalogResult<ToolInvocationResult> {
        self.calls
            .lock()
            .push(FunctionCall::new(name, arguments.clone()));

        match self.results.get(name) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(message)) => Err(CatalogError::ToolCallFailed(message.clone())),
            None => Err(CatalogError::ToolCallFailed(format!("tool not found: {}", name))),
        }
    }

    async fn close(self: Box<Self>) -> CatalogResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_catalog_records_calls_across_clones() {
        let mock = MockCatalog::new().with_tool(
            ToolDescriptor::new("echo", "Echo", json!({"type": "object"})),
            ToolInvocationResult::success("pong"),
        );

        let catalog = mock.connect().await.unwrap();
        assert_eq!(catalog.list_tools().await.unwrap().len(), 1);

        let args = ToolArguments::new().with("msg", json!("ping"));
        let result = catalog.call_tool("echo", &args).await.unwrap();
        assert_eq!(result.payload, "pong");
        assert!(catalog.call_tool("missing", &args).await.is_err());

        catalog.close().await.unwrap();

        assert_eq!(mock.calls().len(), 2);
        assert_eq!(mock.calls()[0], FunctionCall::new("echo", args));
        assert_eq!(mock.connect_count(), 1);
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_catalog_connect_failure() {
        let mock = MockCatalog::new().failing_connect("no such process");
        assert!(matches!(
            mock.connect().await,
            Err(CatalogError::ConnectionFailed(_))
        ));
    }
}
