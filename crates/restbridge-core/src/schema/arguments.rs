//! Validation of model-supplied arguments against a tool's input schema
//!
//! Only the top level is checked: unknown keys, missing required keys and the
//! declared primitive type of each supplied value.

use serde_json::Value;
use thiserror::Error;

use crate::types::ToolArguments;

/// Argument validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("unknown argument '{0}'")]
    UnknownKey(String),

    #[error("missing required argument '{0}'")]
    MissingRequired(String),

    #[error("argument '{key}' should be {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: &'static str,
    },
}

pub type ArgumentResult<T> = Result<T, ArgumentError>;

/// Check `arguments` against `schema`
///
/// A schema without a `properties` object accepts any keys.
pub fn validate_arguments(arguments: &ToolArguments, schema: &Value) -> ArgumentResult<()> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if arguments.get(key).is_none() {
                return Err(ArgumentError::MissingRequired(key.to_string()));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (key, value) in arguments.iter() {
        let property = properties
            .get(key)
            .ok_or_else(|| ArgumentError::UnknownKey(key.clone()))?;

        if let Some(expected) = property.get("type") {
            check_type(key, value, expected)?;
        }
    }

    Ok(())
}

fn check_type(key: &str, value: &Value, expected: &Value) -> ArgumentResult<()> {
    let allowed: Vec<&str> = match expected {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return Ok(()),
    };

    if allowed.is_empty() || allowed.iter().any(|name| matches_type(value, name)) {
        return Ok(());
    }

    Err(ArgumentError::TypeMismatch {
        key: key.to_string(),
        expected: allowed.join(" or "),
        actual: type_name(value),
    })
}

fn matches_type(value: &Value, name: &str) -> bool {
    match name {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true, // Unknown type, accept anything
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {"type": "string"},
                "timeout": {"type": "integer", "format": "uint64"},
                "headers": {"type": ["object", "null"]},
                "data": {"anyOf": [{"type": "object"}, {"type": "string"}]}
            },
            "required": ["url"]
        })
    }

    #[test]
    fn test_valid_arguments() {
        let args = ToolArguments::new()
            .with("url", json!("https://api.example.com"))
            .with("timeout", json!(10))
            .with("headers", Value::Null)
            .with("data", json!("raw"));
        assert_eq!(validate_arguments(&args, &schema()), Ok(()));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let args = ToolArguments::new()
            .with("url", json!("https://api.example.com"))
            .with("shell", json!("rm -rf /"));
        assert_eq!(
            validate_arguments(&args, &schema()),
            Err(ArgumentError::UnknownKey("shell".to_string()))
        );
    }

    #[test]
    fn test_missing_required_key() {
        let args = ToolArguments::new().with("timeout", json!(5));
        assert_eq!(
            validate_arguments(&args, &schema()),
            Err(ArgumentError::MissingRequired("url".to_string()))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let args = ToolArguments::new()
            .with("url", json!("https://api.example.com"))
            .with("timeout", json!(2.5));
        let err = validate_arguments(&args, &schema()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument 'timeout' should be integer, got number"
        );
    }

    #[test]
    fn test_schema_without_properties_accepts_anything() {
        let args = ToolArguments::new().with("anything", json!(1));
        assert_eq!(validate_arguments(&args, &json!({"type": "object"})), Ok(()));
    }
}
