//! Core types shared by the catalog, the model step and the broker

mod decision;
mod tool;

pub use decision::{FunctionCall, ModelDecision};
pub use tool::{FunctionDeclaration, ToolArguments, ToolDescriptor, ToolInvocationResult};
