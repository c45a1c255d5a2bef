//! Session outcome and its user-facing rendering

use std::fmt;

use serde::Serialize;

use crate::types::{FunctionCall, ToolInvocationResult};

const SEPARATOR_WIDTH: usize = 50;
const NO_RESPONSE: &str = "No response generated";

/// The part of the output known once the catalog has been listed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionHeader {
    pub question: String,
    /// Number of tools the catalog listed
    pub tool_count: usize,
}

impl SessionHeader {
    pub fn new(question: impl Into<String>, tool_count: usize) -> Self {
        Self {
            question: question.into(),
            tool_count,
        }
    }
}

impl fmt::Display for SessionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Connected to tool catalog with {} tools available",
            self.tool_count
        )?;
        writeln!(f)?;
        writeln!(f, "Question: {}", self.question)?;
        write!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}

/// What the session ended with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The model answered in text; may be empty
    Answered { text: String },
    /// The model called a tool and the catalog ran it
    Invoked {
        call: FunctionCall,
        result: ToolInvocationResult,
    },
}

/// Outcome of one finished broker session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub question: String,
    /// Number of tools the catalog listed
    pub tool_count: usize,
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn answered(question: impl Into<String>, tool_count: usize, text: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            tool_count,
            outcome: SessionOutcome::Answered { text: text.into() },
        }
    }

    pub fn invoked(
        question: impl Into<String>,
        tool_count: usize,
        call: FunctionCall,
        result: ToolInvocationResult,
    ) -> Self {
        Self {
            question: question.into(),
            tool_count,
            outcome: SessionOutcome::Invoked { call, result },
        }
    }

    pub fn header(&self) -> SessionHeader {
        SessionHeader::new(self.question.clone(), self.tool_count)
    }

    /// The text answer, if the model answered in text
    pub fn answer(&self) -> Option<&str> {
        match &self.outcome {
            SessionOutcome::Answered { text } => Some(text),
            SessionOutcome::Invoked { .. } => None,
        }
    }

    /// The call and its result, if a tool was invoked
    pub fn invocation(&self) -> Option<(&FunctionCall, &ToolInvocationResult)> {
        match &self.outcome {
            SessionOutcome::Invoked { call, result } => Some((call, result)),
            SessionOutcome::Answered { .. } => None,
        }
    }
}

/// Pretty-print `payload` when it parses as JSON, otherwise return it as is
pub fn render_payload(payload: &str) -> String {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| payload.to_string())
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SEPARATOR_WIDTH);

        writeln!(f, "{}", self.header())?;

        match &self.outcome {
            SessionOutcome::Answered { text } => {
                writeln!(f, "AI Response:")?;
                if text.is_empty() {
                    write!(f, "{}", NO_RESPONSE)
                } else {
                    write!(f, "{}", text)
                }
            }
            SessionOutcome::Invoked { call, result } => {
                writeln!(f, "AI is calling function: {}", call.name)?;
                writeln!(f, "Arguments: {}", call.arguments)?;
                writeln!(f, "{}", separator)?;
                writeln!(f, "Result:")?;
                write!(f, "{}", render_payload(&result.payload))
            }
        }
    }
}
