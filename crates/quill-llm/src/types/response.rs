use serde::{Deserialize, Serialize};

use super::message::ToolCall;

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the completion
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// What the model produced, handled exhaustively at the call site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Final natural-language answer
    Text(String),
    /// Structured value parsed under a JSON output shape
    Parsed(serde_json::Value),
    /// Tool invocations requiring local execution before a second pass
    ToolCalls {
        /// Assistant text accompanying the calls, if any
        content: Option<String>,
        /// Requested invocations, in issue order
        calls: Vec<ToolCall>,
    },
}

/// Result of a single gateway call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Model output
    pub outcome: Outcome,
    /// Reasoning-summary fragments, in response order
    pub reasoning: Vec<String>,
    /// Token usage, when reported
    pub usage: Option<Usage>,
}

impl Completion {
    /// All reasoning-summary fragments joined with a single space
    ///
    /// Empty string when the model produced no summary.
    #[must_use]
    pub fn reasoning_summary(&self) -> String {
        self.reasoning.join(" ")
    }

    /// Final text, if the outcome is textual
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Text(text) => Some(text),
            Outcome::Parsed(_) | Outcome::ToolCalls { .. } => None,
        }
    }

    /// Tool calls, if the outcome requests local execution
    #[must_use]
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match &self.outcome {
            Outcome::ToolCalls { calls, .. } => Some(calls),
            Outcome::Text(_) | Outcome::Parsed(_) => None,
        }
    }
}
