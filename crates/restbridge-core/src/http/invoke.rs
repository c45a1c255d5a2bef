//! The generic HTTP invocation primitive
//!
//! Every outcome comes back as text. The caller on the other side of the tool
//! boundary is a language model, which cannot catch a typed error.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use thiserror::Error;

use super::request::{RequestBody, RestCall};

/// Ways an invocation can fail, each with its user-facing wording
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationFailure {
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("failed to connect to {url}")]
    Connect { url: String },

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(String),
}

/// Issue one HTTP request and return the response body or a failure description
pub async fn invoke(client: &reqwest::Client, call: &RestCall) -> String {
    match try_invoke(client, call).await {
        Ok(body) => body,
        Err(failure) => failure.to_string(),
    }
}

/// Same as [`invoke`] but keeps the failure class
pub async fn try_invoke(
    client: &reqwest::Client,
    call: &RestCall,
) -> Result<String, InvocationFailure> {
    let method_name = call.method.to_uppercase();
    let method = Method::from_bytes(method_name.as_bytes()).map_err(|e| {
        InvocationFailure::Request(format!("invalid HTTP method '{}': {}", call.method, e))
    })?;

    let mut request = client
        .request(method, call.url.as_str())
        .timeout(Duration::from_secs(call.timeout));

    if let Some(headers) = &call.headers {
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
    }

    match &call.data {
        Some(RequestBody::Json(body)) => {
            if !call.has_content_type() {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            let bytes = serde_json::to_vec(body)
                .map_err(|e| InvocationFailure::Request(e.to_string()))?;
            request = request.body(bytes);
        }
        Some(RequestBody::Raw(text)) => {
            request = request.body(text.clone());
        }
        None => {}
    }

    let query = call.query_pairs();
    if !query.is_empty() {
        request = request.query(&query);
    }

    let response = request.send().await.map_err(|e| classify(e, call))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| classify(e, call))?;

    if status.is_client_error() || status.is_server_error() {
        return Err(InvocationFailure::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

fn classify(error: reqwest::Error, call: &RestCall) -> InvocationFailure {
    if error.is_timeout() {
        InvocationFailure::Timeout {
            seconds: call.timeout,
        }
    } else if error.is_connect() {
        InvocationFailure::Connect {
            url: call.url.clone(),
        }
    } else {
        InvocationFailure::Request(error.to_string())
    }
}
