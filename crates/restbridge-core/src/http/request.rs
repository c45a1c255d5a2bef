//! Request shape accepted by the `call_rest_api` tool
//!
//! The doc comments on the fields end up in the tool's JSON Schema, so they
//! are written for the model as much as for readers.
//!
//! Gemini reads the schema as an OpenAPI subset: no `$ref`/`$defs`, no
//! `const`, no nested `additionalProperties`, no unsigned integer formats.
//! Fields whose derived schema would use those carry a hand-written one.

use std::collections::{BTreeMap, HashMap};

use rmcp::schemars::{self, json_schema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default HTTP method
pub const DEFAULT_METHOD: &str = "GET";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn headers_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "nullable": true,
        "description": "Optional HTTP headers as key-value pairs"
    })
}

fn data_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "anyOf": [
            { "type": "object" },
            { "type": "string" }
        ],
        "nullable": true,
        "description": "Request body data (object for JSON, string for raw data)"
    })
}

fn params_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "object",
        "nullable": true,
        "description": "URL query parameters as key-value pairs"
    })
}

fn timeout_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "integer",
        "default": DEFAULT_TIMEOUT_SECS,
        "description": "Request timeout in seconds"
    })
}

/// Make a REST API call to any endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RestCall {
    /// The complete API endpoint URL
    pub url: String,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH)
    #[serde(default = "default_method")]
    pub method: String,

    /// Optional HTTP headers as key-value pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "headers_schema")]
    pub headers: Option<HashMap<String, String>>,

    /// Request body data (object for JSON, string for raw data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "data_schema")]
    pub data: Option<RequestBody>,

    /// URL query parameters as key-value pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "params_schema")]
    pub params: Option<BTreeMap<String, Value>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    #[schemars(schema_with = "timeout_schema")]
    pub timeout: u64,
}

impl RestCall {
    /// A GET request with default settings
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            headers: None,
            data: None,
            params: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_json(mut self, body: BTreeMap<String, Value>) -> Self {
        self.data = Some(RequestBody::Json(body));
        self
    }

    pub fn with_raw(mut self, body: impl Into<String>) -> Self {
        self.data = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value);
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Whether the caller supplied a Content-Type header (any casing)
    pub fn has_content_type(&self) -> bool {
        self.headers
            .as_ref()
            .map(|h| h.keys().any(|k| k.eq_ignore_ascii_case("content-type")))
            .unwrap_or(false)
    }

    /// Query parameters flattened to string pairs
    ///
    /// Nulls are dropped and arrays repeat the key once per element.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let Some(params) = &self.params else {
            return pairs;
        };

        for (key, value) in params {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = param_text(item) {
                            pairs.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = param_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

fn param_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Request body: a JSON object or a raw string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Serialized as JSON
    Json(BTreeMap<String, Value>),
    /// Sent verbatim
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_has_no_references() {
        let schema = serde_json::to_value(schemars::schema_for!(RestCall)).unwrap();
        let text = schema.to_string();

        assert!(!text.contains("$ref"));
        assert!(!text.contains("$defs"));
        assert_eq!(schema["properties"]["timeout"]["type"], json!("integer"));
        assert_eq!(
            schema["properties"]["data"]["anyOf"],
            json!([{ "type": "object" }, { "type": "string" }])
        );
        assert_eq!(schema["required"], json!(["url"]));
    }

    #[test]
    fn test_defaults_from_minimal_arguments() {
        let call: RestCall = serde_json::from_value(json!({
            "url": "https://api.example.com/items"
        }))
        .unwrap();

        assert_eq!(call.method, "GET");
        assert_eq!(call.timeout, 30);
        assert!(call.headers.is_none());
        assert!(call.data.is_none());
    }

    #[test]
    fn test_body_variants() {
        let call: RestCall = serde_json::from_value(json!({
            "url": "https://api.example.com",
            "data": {"name": "widget"}
        }))
        .unwrap();
        assert!(matches!(call.data, Some(RequestBody::Json(_))));

        let call: RestCall = serde_json::from_value(json!({
            "url": "https://api.example.com",
            "data": "a=1&b=2"
        }))
        .unwrap();
        assert_eq!(call.data, Some(RequestBody::Raw("a=1&b=2".to_string())));
    }

    #[test]
    fn test_content_type_lookup_ignores_case() {
        let call = RestCall::get("https://api.example.com").with_header("content-TYPE", "text/plain");
        assert!(call.has_content_type());
        assert!(!RestCall::get("https://api.example.com").has_content_type());
    }

    #[test]
    fn test_query_pairs() {
        let call = RestCall::get("https://api.example.com")
            .with_param("city", json!("Paris"))
            .with_param("days", json!(3))
            .with_param("skip", Value::Null)
            .with_param("tag", json!(["a", "b"]));

        assert_eq!(
            call.query_pairs(),
            vec![
                ("city".to_string(), "Paris".to_string()),
                ("days".to_string(), "3".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }
}
