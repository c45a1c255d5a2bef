//! Turning a model reply into a single decision

use crate::types::{FunctionDeclaration, ModelDecision, ToolArguments};

use super::error::{ProviderError, ProviderResult};
use super::traits::{ModelBackend, ModelReply, ModelRequest};

/// Ask the model what to do with `prompt`
///
/// Errors from the backend (unreachable, rejected key, quota, bad schema)
/// are returned unchanged; the broker reports them as "model unavailable".
pub async fn decide(
    backend: &dyn ModelBackend,
    prompt: &str,
    tools: &[FunctionDeclaration],
    model: &str,
    temperature: f64,
) -> ProviderResult<ModelDecision> {
    let request = ModelRequest::new(model, prompt)
        .with_temperature(temperature)
        .with_tools(tools.to_vec());

    let reply = backend.generate(request).await?;
    interpret_reply(backend.name(), reply)
}

/// Pick the decision carried by a reply
///
/// - exactly one function-call part: that call, arguments verbatim
/// - no function-call part: the text parts joined (possibly empty)
/// - several function-call parts: rejected
pub fn interpret_reply(provider: &str, reply: ModelReply) -> ProviderResult<ModelDecision> {
    let ModelReply {
        texts,
        mut function_calls,
    } = reply;

    match function_calls.len() {
        0 => Ok(ModelDecision::text(texts.concat())),
        1 => {
            let call = function_calls.remove(0);
            let arguments = ToolArguments::from_value(call.arguments).map_err(|other| {
                ProviderError::invalid_response(
                    provider,
                    format!("arguments for '{}' are not an object: {}", call.name, other),
                )
            })?;
            Ok(ModelDecision::call(call.name, arguments))
        }
        count => Err(ProviderError::MultipleFunctionCalls {
            provider: provider.to_string(),
            count,
        }),
    }
}
