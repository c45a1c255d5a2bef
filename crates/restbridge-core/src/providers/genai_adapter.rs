//! Adapter between restbridge types and genai types
//!
//! Auth is always supplied explicitly through an `AuthResolver`; genai's own
//! environment lookup is never used.

use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponse, Tool as GenaiTool};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};

use crate::types::FunctionDeclaration;

use super::traits::{FunctionCallPart, ModelReply, ModelRequest};

// ============================================================================
// Request Conversion: restbridge -> genai
// ============================================================================

/// Convert a function declaration to a genai Tool
pub fn to_genai_tool(declaration: &FunctionDeclaration) -> GenaiTool {
    GenaiTool::new(&declaration.name)
        .with_description(&declaration.description)
        .with_schema(declaration.parameters.clone())
}

/// Convert function declarations to genai tools
pub fn to_genai_tools(declarations: &[FunctionDeclaration]) -> Vec<GenaiTool> {
    declarations.iter().map(to_genai_tool).collect()
}

/// Build the single-message chat request for a model request
pub fn to_chat_request(request: &ModelRequest) -> ChatRequest {
    let chat_req = ChatRequest::new(vec![ChatMessage::user(request.prompt.clone())]);

    if request.tools.is_empty() {
        chat_req
    } else {
        chat_req.with_tools(to_genai_tools(&request.tools))
    }
}

/// Build chat options for a model request
pub fn to_chat_options(request: &ModelRequest) -> ChatOptions {
    ChatOptions::default().with_temperature(request.temperature)
}

// ============================================================================
// Response Conversion: genai -> restbridge
// ============================================================================

/// Collect the text and function-call parts of a chat response
pub fn from_chat_response(response: &ChatResponse) -> ModelReply {
    let texts = response
        .texts()
        .into_iter()
        .map(|text| text.to_string())
        .collect();

    let function_calls = response
        .tool_calls()
        .into_iter()
        .map(|tc| FunctionCallPart::new(tc.fn_name.clone(), tc.fn_arguments.clone()))
        .collect();

    ModelReply {
        texts,
        function_calls,
    }
}

// ============================================================================
// Client Creation
// ============================================================================

/// Create a genai client that authenticates with `api_key`
pub fn create_client(api_key: String) -> Client {
    let auth_resolver = AuthResolver::from_resolver_fn(
        move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
            Ok(Some(AuthData::from_single(api_key.clone())))
        },
    );

    Client::builder().with_auth_resolver(auth_resolver).build()
}
