//! Model decision types

use serde::{Deserialize, Serialize};

use super::tool::ToolArguments;

/// A structured request from the model to run one named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the tool being called
    pub name: String,
    /// Arguments exactly as the model produced them
    pub arguments: ToolArguments,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// What the model chose to do with a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelDecision {
    /// Plain answer; may be empty when the model produced nothing
    TextAnswer { text: String },
    /// A single function call
    FunctionCall(FunctionCall),
}

impl ModelDecision {
    pub fn text(text: impl Into<String>) -> Self {
        ModelDecision::TextAnswer { text: text.into() }
    }

    pub fn call(name: impl Into<String>, arguments: ToolArguments) -> Self {
        ModelDecision::FunctionCall(FunctionCall::new(name, arguments))
    }

    pub fn is_function_call(&self) -> bool {
        matches!(self, ModelDecision::FunctionCall(_))
    }
}
