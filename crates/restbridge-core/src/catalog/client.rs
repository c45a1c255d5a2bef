//! MCP client for the tool catalog, using the official rmcp SDK
//!
//! The catalog normally runs as a child process reached over its stdio.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent,
    },
    service::RunningService,
    transport::{IntoTransport, TokioChildProcess},
    RoleClient, ServiceExt,
};
use tokio::process::Command;

use crate::config::CatalogCommand;
use crate::logging::Logger;
use crate::types::{ToolArguments, ToolDescriptor, ToolInvocationResult};

use super::error::{CatalogError, CatalogResult};
use super::traits::{CatalogConnector, ToolCatalog};

/// MCP client connected to a tool catalog
pub struct McpClient {
    /// The underlying rmcp running service
    client: RunningService<RoleClient, ClientInfo>,
    /// Pid of the catalog process, when we spawned it
    process_id: Option<u32>,
    /// Logger
    logger: Arc<dyn Logger>,
}

impl McpClient {
    fn client_info() -> ClientInfo {
        ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "restbridge-broker".to_string(),
                title: Some("restbridge broker".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        }
    }

    /// Spawn the catalog process and connect over its stdin/stdout
    pub async fn connect_child_process(
        command: &CatalogCommand,
        logger: Arc<dyn Logger>,
    ) -> CatalogResult<Self> {
        logger.info(&format!(
            "[McpClient] Spawning catalog: {} {}",
            command.program,
            command.args.join(" ")
        ));

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).kill_on_drop(true);
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        let transport = TokioChildProcess::new(cmd)
            .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;
        let process_id = transport.id();

        let mut client = Self::connect_transport(transport, logger).await?;
        client.process_id = process_id;
        Ok(client)
    }

    /// Connect over any rmcp transport (child process, socket, in-memory stream)
    pub async fn connect_transport<T, E, A>(
        transport: T,
        logger: Arc<dyn Logger>,
    ) -> CatalogResult<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let client = Self::client_info()
            .serve(transport)
            .await
            .map_err(|e| CatalogError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client,
            process_id: None,
            logger,
        })
    }

    /// List all available tools
    pub async fn list_tools(&self) -> CatalogResult<Vec<ToolDescriptor>> {
        let result = self
            .client
            .list_tools(Default::default())
            .await
            .map_err(|e| CatalogError::Protocol(e.to_string()))?;

        self.logger.info(&format!(
            "[McpClient] Listed {} tools",
            result.tools.len()
        ));

        Ok(result.tools.into_iter().map(ToolDescriptor::from).collect())
    }

    /// Call a tool by name
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> CatalogResult<ToolInvocationResult> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments.as_map().clone()),
            task: None,
        };

        let result = self
            .client
            .call_tool(params)
            .await
            .map_err(|e| CatalogError::ToolCallFailed(e.to_string()))?;

        Ok(to_invocation_result(result))
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.client.peer_info().map(|info| &info.server_info)
    }

    /// Pid of the spawned catalog process
    pub fn process_id(&self) -> Option<u32> {
        self.process_id
    }

    /// Close the connection
    pub async fn close(self) -> CatalogResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| CatalogError::Protocol(e.to_string()))?;
        Ok(())
    }
}

/// Flatten an MCP tool result into text
fn to_invocation_result(result: CallToolResult) -> ToolInvocationResult {
    // Content is Annotated<RawContent>; .raw holds the RawContent
    let text = result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    let payload = if text.is_empty() && !result.content.is_empty() {
        serde_json::to_string(&result.content).unwrap_or_default()
    } else {
        text
    };

    if result.is_error.unwrap_or(false) {
        ToolInvocationResult::error(payload)
    } else {
        ToolInvocationResult::success(payload)
    }
}

#[async_trait]
impl ToolCatalog for McpClient {
    async fn list_tools(&self) -> CatalogResult<Vec<ToolDescriptor>> {
        McpClient::list_tools(self).await
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> CatalogResult<ToolInvocationResult> {
        McpClient::call_tool(self, name, arguments).await
    }

    async fn close(self: Box<Self>) -> CatalogResult<()> {
        McpClient::close(*self).await
    }
}

/// Connects to a catalog by spawning its process
pub struct ChildProcessConnector {
    command: CatalogCommand,
    logger: Arc<dyn Logger>,
}

impl ChildProcessConnector {
    pub fn new(command: CatalogCommand, logger: Arc<dyn Logger>) -> Self {
        Self { command, logger }
    }

    pub fn command(&self) -> &CatalogCommand {
        &self.command
    }
}

#[async_trait]
impl CatalogConnector for ChildProcessConnector {
    async fn connect(&self) -> CatalogResult<Box<dyn ToolCatalog>> {
        let client = McpClient::connect_child_process(&self.command, Arc::clone(&self.logger)).await?;
        Ok(Box::new(client))
    }
}
