//! Tool descriptor → function declaration

use serde_json::Value;

use crate::types::{FunctionDeclaration, ToolDescriptor};

/// Top-level JSON Schema keys the function-calling API rejects
pub const STRIPPED_SCHEMA_KEYS: [&str; 2] = ["additionalProperties", "$schema"];

/// Convert a catalog descriptor into a function declaration
///
/// Name and description are copied verbatim. The schema is cloned without its
/// top-level `additionalProperties` and `$schema` entries; nested schemas and
/// non-object schemas are left as they are.
pub fn translate(descriptor: &ToolDescriptor) -> FunctionDeclaration {
    let parameters = match &descriptor.input_schema {
        Value::Object(schema) => Value::Object(
            schema
                .iter()
                .filter(|(key, _)| !STRIPPED_SCHEMA_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    };

    FunctionDeclaration {
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        parameters,
    }
}

/// Translate a whole catalog, keeping its order
pub fn translate_all(descriptors: &[ToolDescriptor]) -> Vec<FunctionDeclaration> {
    descriptors.iter().map(translate).collect()
}
