//! Tool catalog server hosting the `call_rest_api` operation
//!
//! Runs as its own process and speaks MCP over stdio. Stdout carries the
//! protocol, so nothing else may write to it.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::{stdio, IntoTransport},
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};

use crate::http::{invoke, RestCall};
use crate::logging::Logger;

use super::error::{CatalogError, CatalogResult};

/// Name under which the REST primitive is registered
pub const REST_TOOL_NAME: &str = "call_rest_api";

/// MCP server exposing the generic REST primitive
#[derive(Clone)]
pub struct RestCatalogServer {
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RestCatalogServer {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_client(reqwest::Client::new(), logger)
    }

    /// Use a preconfigured HTTP client (proxy, TLS roots, ...)
    pub fn with_client(http: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self {
            http,
            logger,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Make a REST API call to any endpoint. Returns the response body as text, or a description of the failure (timeout, connection error, HTTP error status)."
    )]
    async fn call_rest_api(
        &self,
        Parameters(call): Parameters<RestCall>,
    ) -> Result<CallToolResult, McpError> {
        self.logger.info(&format!(
            "[RestCatalog] {} {}",
            call.method.to_uppercase(),
            call.url
        ));

        let body = invoke(&self.http, &call).await;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

impl RestCatalogServer {
    /// Serve the catalog on this process's stdin/stdout until the client leaves
    pub async fn serve_stdio(self) -> CatalogResult<()> {
        self.serve_transport(stdio()).await
    }

    /// Serve the catalog over any rmcp transport
    pub async fn serve_transport<T, E, A>(self, transport: T) -> CatalogResult<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let logger = Arc::clone(&self.logger);

        let service = self
            .serve(transport)
            .await
            .map_err(|e| CatalogError::InitializationFailed(e.to_string()))?;
        logger.info("[RestCatalog] Client connected");

        let reason = service
            .waiting()
            .await
            .map_err(|e| CatalogError::Protocol(e.to_string()))?;
        logger.info(&format!("[RestCatalog] Session ended: {:?}", reason));

        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for RestCatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "restbridge-catalog".to_string(),
                title: Some("restbridge REST catalog".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
            instructions: Some(format!(
                "Use {} to call any HTTP endpoint on the user's behalf.",
                REST_TOOL_NAME
            )),
            ..Default::default()
        }
    }
}
