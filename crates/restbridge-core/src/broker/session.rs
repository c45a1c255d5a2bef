//! The broker: one prompt in, one report out

use std::sync::Arc;

use crate::catalog::{CatalogConnector, ToolCatalog};
use crate::config::{BrokerSettings, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::logging::Logger;
use crate::providers::{decide, ModelBackend};
use crate::schema::{translate_all, validate_arguments};
use crate::types::{FunctionCall, FunctionDeclaration, ModelDecision};

use super::error::{BrokerError, BrokerResult, SessionFailure};
use super::render::{SessionHeader, SessionReport};
use super::state::SessionState;

/// Connects a model to a tool catalog for single-prompt sessions
///
/// Each call to [`Broker::run`] opens its own catalog connection and closes
/// it before returning, whatever the outcome.
pub struct Broker {
    connector: Arc<dyn CatalogConnector>,
    backend: Arc<dyn ModelBackend>,
    model: String,
    temperature: f64,
    logger: Arc<dyn Logger>,
}

impl Broker {
    pub fn new(
        connector: Arc<dyn CatalogConnector>,
        backend: Arc<dyn ModelBackend>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            connector,
            backend,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            logger,
        }
    }

    /// Create a broker using the model and temperature from `settings`
    pub fn from_settings(
        settings: &BrokerSettings,
        connector: Arc<dyn CatalogConnector>,
        backend: Arc<dyn ModelBackend>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self::new(connector, backend, logger)
            .with_model(settings.model.clone())
            .with_temperature(settings.temperature)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Run one session for `prompt`
    pub async fn run(&self, prompt: &str) -> BrokerResult<SessionReport> {
        self.execute(prompt).await.map_err(|failure| failure.error)
    }

    /// Run one session, keeping the header of a session that failed midway
    pub async fn execute(&self, prompt: &str) -> Result<SessionReport, SessionFailure> {
        self.enter(SessionState::Connecting);
        let catalog = self
            .connector
            .connect()
            .await
            .map_err(|e| SessionFailure::new(None, BrokerError::CatalogUnreachable(e)))?;

        let mut header = None;
        let outcome = self
            .run_with_catalog(catalog.as_ref(), prompt, &mut header)
            .await;

        self.enter(SessionState::Done);
        if let Err(e) = catalog.close().await {
            self.logger
                .warn(&format!("[Broker] Failed to close tool catalog: {}", e));
        }

        outcome.map_err(|error| {
            self.logger.error(&format!("[Broker] Session failed: {}", error));
            SessionFailure::new(header, error)
        })
    }

    async fn run_with_catalog(
        &self,
        catalog: &dyn ToolCatalog,
        prompt: &str,
        header: &mut Option<SessionHeader>,
    ) -> BrokerResult<SessionReport> {
        let tools = catalog
            .list_tools()
            .await
            .map_err(BrokerError::CatalogUnreachable)?;
        let declarations = translate_all(&tools);
        *header = Some(SessionHeader::new(prompt, tools.len()));
        self.enter(SessionState::CatalogFetched);
        self.logger.info(&format!(
            "[Broker] Connected to tool catalog with {} tools available",
            tools.len()
        ));

        self.enter(SessionState::Deciding);
        let decision = decide(
            self.backend.as_ref(),
            prompt,
            &declarations,
            &self.model,
            self.temperature,
        )
        .await?;

        match decision {
            ModelDecision::TextAnswer { text } => {
                self.enter(SessionState::Answering);
                Ok(SessionReport::answered(prompt, tools.len(), text))
            }
            ModelDecision::FunctionCall(call) => {
                self.enter(SessionState::Invoking);
                self.check_call(&call, &declarations)?;

                self.logger.info(&format!(
                    "[Broker] Calling {} with {}",
                    call.name, call.arguments
                ));
                let result = catalog
                    .call_tool(&call.name, &call.arguments)
                    .await
                    .map_err(BrokerError::ToolExecutionFailed)?;
                if !result.success {
                    self.logger
                        .warn(&format!("[Broker] {} reported an error", call.name));
                }

                Ok(SessionReport::invoked(prompt, tools.len(), call, result))
            }
        }
    }

    /// The call must name a listed tool and fit its schema
    fn check_call(
        &self,
        call: &FunctionCall,
        declarations: &[FunctionDeclaration],
    ) -> BrokerResult<()> {
        let declaration = declarations
            .iter()
            .find(|d| d.name == call.name)
            .ok_or_else(|| BrokerError::UnknownTool(call.name.clone()))?;

        validate_arguments(&call.arguments, &declaration.parameters).map_err(|source| {
            BrokerError::InvalidArguments {
                name: call.name.clone(),
                source,
            }
        })
    }

    fn enter(&self, state: SessionState) {
        self.logger.debug(&format!("[Broker] state -> {}", state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::catalog::MockCatalog;
    use crate::logging::NoOpLogger;
    use crate::providers::{MockBackend, ModelReply};
    use crate::types::{ToolArguments, ToolDescriptor, ToolInvocationResult};

    fn rest_tool() -> ToolDescriptor {
        ToolDescriptor::new(
            "call_rest_api",
            "Make a REST API call",
            json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "type": "object",
                "properties": {
                    "url": { "type": "string" },
                    "method": { "type": "string" },
                    "timeout": { "type": "integer" }
                },
                "required": ["url"],
                "additionalProperties": false
            }),
        )
    }

    fn broker(catalog: &MockCatalog, backend: &MockBackend) -> Broker {
        Broker::new(
            Arc::new(catalog.clone()),
            Arc::new(backend.clone()),
            Arc::new(NoOpLogger),
        )
    }

    #[tokio::test]
    async fn test_weather_for_paris() {
        let catalog = MockCatalog::new().with_tool(
            rest_tool(),
            ToolInvocationResult::success(r#"{"city":"Paris","temp_c":18}"#),
        );
        let backend = MockBackend::fixed(
            ModelReply::function_call(
                "call_rest_api",
                json!({"url": "https://wttr.in/Paris?format=j1"}),
            ),
            Arc::new(NoOpLogger),
        );

        let report = broker(&catalog, &backend)
            .run("get the weather for Paris")
            .await
            .unwrap();

        let calls = catalog.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "call_rest_api");
        assert_eq!(
            calls[0].arguments,
            ToolArguments::new().with("url", json!("https://wttr.in/Paris?format=j1"))
        );

        let rendered = report.to_string();
        assert!(rendered.contains("Question: get the weather for Paris"));
        assert!(rendered.contains("AI is calling function: call_rest_api"));
        assert!(rendered.ends_with("Result:\n{\n  \"city\": \"Paris\",\n  \"temp_c\": 18\n}"));
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_model_sees_translated_declarations() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::fixed(ModelReply::text("no tool needed"), Arc::new(NoOpLogger));

        broker(&catalog, &backend)
            .with_model("gemini-test")
            .with_temperature(0.3)
            .run("hello")
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gemini-test");
        assert_eq!(requests[0].temperature, 0.3);
        let parameters = &requests[0].tools[0].parameters;
        assert!(parameters.get("$schema").is_none());
        assert!(parameters.get("additionalProperties").is_none());
        assert_eq!(parameters["required"], json!(["url"]));
    }

    #[tokio::test]
    async fn test_text_answer_makes_no_call() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::fixed(ModelReply::text("2 + 2 = 4"), Arc::new(NoOpLogger));

        let report = broker(&catalog, &backend).run("What is 2+2?").await.unwrap();

        assert_eq!(report.answer(), Some("2 + 2 = 4"));
        assert!(report.to_string().ends_with("AI Response:\n2 + 2 = 4"));
        assert!(catalog.calls().is_empty());
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_answer() {
        let catalog = MockCatalog::new();
        let backend = MockBackend::fixed(ModelReply::empty(), Arc::new(NoOpLogger));

        let report = broker(&catalog, &backend).run("Hi").await.unwrap();
        assert_eq!(report.tool_count, 0);
        assert!(report.to_string().ends_with("No response generated"));
    }

    #[tokio::test]
    async fn test_invalid_key_is_fatal_and_closes_catalog() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::missing_key(Arc::new(NoOpLogger));

        let result = broker(&catalog, &backend).run("get the weather for Paris").await;

        assert!(matches!(result, Err(BrokerError::ModelUnavailable(_))));
        assert!(catalog.calls().is_empty());
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_backend_error_is_model_unavailable() {
        let catalog = MockCatalog::new();
        let backend = MockBackend::error("quota exceeded", Arc::new(NoOpLogger));

        let err = broker(&catalog, &backend).run("Hi").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_after_listing_keeps_header() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::missing_key(Arc::new(NoOpLogger));

        let failure = broker(&catalog, &backend)
            .execute("get the weather for Paris")
            .await
            .unwrap_err();

        assert_eq!(
            failure.header,
            Some(SessionHeader::new("get the weather for Paris", 1))
        );
        assert!(matches!(failure.error, BrokerError::ModelUnavailable(_)));
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_before_listing_has_no_header() {
        let catalog = MockCatalog::new().failing_list("broken pipe");
        let backend = MockBackend::fixed(ModelReply::text("unused"), Arc::new(NoOpLogger));

        let failure = broker(&catalog, &backend).execute("Hi").await.unwrap_err();

        assert!(failure.header.is_none());
        assert!(matches!(failure.error, BrokerError::CatalogUnreachable(_)));
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let catalog = MockCatalog::new().failing_connect("no such program");
        let backend = MockBackend::fixed(ModelReply::text("unused"), Arc::new(NoOpLogger));

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::CatalogUnreachable(_))));
        assert!(backend.requests().is_empty());
        assert_eq!(catalog.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_listing_failure_is_catalog_unreachable() {
        let catalog = MockCatalog::new().failing_list("broken pipe");
        let backend = MockBackend::fixed(ModelReply::text("unused"), Arc::new(NoOpLogger));

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::CatalogUnreachable(_))));
        assert!(backend.requests().is_empty());
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected_before_dispatch() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::fixed(
            ModelReply::function_call("delete_everything", json!({})),
            Arc::new(NoOpLogger),
        );

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::UnknownTool(name)) if name == "delete_everything"));
        assert!(catalog.calls().is_empty());
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_rejected_before_dispatch() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::fixed(
            ModelReply::function_call("call_rest_api", json!({"method": "GET"})),
            Arc::new(NoOpLogger),
        );

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::InvalidArguments { .. })));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_multiple_calls_are_ambiguous() {
        let catalog = MockCatalog::new().with_tool(rest_tool(), ToolInvocationResult::success(""));
        let backend = MockBackend::fixed(
            ModelReply::function_call("call_rest_api", json!({"url": "https://a.test"}))
                .with_function_call("call_rest_api", json!({"url": "https://b.test"})),
            Arc::new(NoOpLogger),
        );

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::AmbiguousDecision { count: 2 })));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_tool_execution_failure() {
        let catalog = MockCatalog::new().with_failing_tool(rest_tool(), "transport closed");
        let backend = MockBackend::fixed(
            ModelReply::function_call("call_rest_api", json!({"url": "https://a.test"})),
            Arc::new(NoOpLogger),
        );

        let result = broker(&catalog, &backend).run("Hi").await;

        assert!(matches!(result, Err(BrokerError::ToolExecutionFailed(_))));
        assert_eq!(catalog.calls().len(), 1);
        assert_eq!(catalog.close_count(), 1);
    }

    #[tokio::test]
    async fn test_in_band_http_failure_is_rendered() {
        let catalog = MockCatalog::new().with_tool(
            rest_tool(),
            ToolInvocationResult::success("HTTP error 404: not found"),
        );
        let backend = MockBackend::fixed(
            ModelReply::function_call("call_rest_api", json!({"url": "https://a.test/missing"})),
            Arc::new(NoOpLogger),
        );

        let report = broker(&catalog, &backend).run("Hi").await.unwrap();
        assert!(report.to_string().ends_with("Result:\nHTTP error 404: not found"));
    }

    #[tokio::test]
    async fn test_from_settings() {
        let settings = BrokerSettings::new()
            .with_model("gemini-1.5-pro")
            .with_temperature(0.9);
        let broker = Broker::from_settings(
            &settings,
            Arc::new(MockCatalog::new()),
            Arc::new(MockBackend::fixed(ModelReply::empty(), Arc::new(NoOpLogger))),
            Arc::new(NoOpLogger),
        );
        assert_eq!(broker.model(), "gemini-1.5-pro");
        assert_eq!(broker.temperature(), 0.9);
    }
}
