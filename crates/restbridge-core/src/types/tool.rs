//! Tool catalog and function-calling types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rmcp::model::Tool as McpTool;

/// A named operation as advertised by the tool catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for tool parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

impl From<McpTool> for ToolDescriptor {
    fn from(tool: McpTool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
            // input_schema is Arc<JsonObject>
            input_schema: Value::Object(tool.input_schema.as_ref().clone()),
        }
    }
}

/// Function declaration in the shape a function-calling model accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Arguments for a tool call: always a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolArguments(Map<String, Value>);

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary JSON value.
    ///
    /// `null` is read as "no arguments"; anything other than an object is
    /// rejected and handed back.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(other),
        }
    }

    /// Add an argument
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl std::fmt::Display for ToolArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Outcome of a tool call as reported by the catalog
///
/// HTTP-level failures arrive here as successful results whose payload
/// describes the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    /// False only when the catalog flagged the result as an error
    pub success: bool,
    /// Response body or error description, never empty on failure
    pub payload: String,
}

impl ToolInvocationResult {
    /// Create a successful result
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            success: true,
            payload: payload.into(),
        }
    }

    /// Create an error result
    pub fn error(payload: impl Into<String>) -> Self {
        let payload = payload.into();
        Self {
            success: false,
            payload: if payload.is_empty() {
                "tool reported an error without details".to_string()
            } else {
                payload
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_serializes_input_schema_key() {
        let tool = ToolDescriptor::new(
            "call_rest_api",
            "Make a REST API call",
            json!({"type": "object"}),
        );
        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["inputSchema"], json!({"type": "object"}));
    }

    #[test]
    fn test_arguments_from_value() {
        let args = ToolArguments::from_value(json!({"url": "https://example.com"})).unwrap();
        assert_eq!(args.get("url"), Some(&json!("https://example.com")));

        assert!(ToolArguments::from_value(Value::Null).unwrap().is_empty());
        assert_eq!(ToolArguments::from_value(json!([1, 2])), Err(json!([1, 2])));
    }

    #[test]
    fn test_arguments_display_is_compact_json() {
        let args = ToolArguments::new().with("method", json!("GET"));
        assert_eq!(args.to_string(), r#"{"method":"GET"}"#);
    }

    #[test]
    fn test_invocation_result() {
        let ok = ToolInvocationResult::success("{\"a\":1}");
        assert!(ok.success);

        let err = ToolInvocationResult::error("");
        assert!(!err.success);
        assert!(!err.payload.is_empty());
    }
}
