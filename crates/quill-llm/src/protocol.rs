//! Chat-completions wire format
//!
//! Request knobs cover both model classes: `temperature` for standard
//! models, `verbosity`/`reasoning_effort` for reasoning models. The gateway
//! guarantees only the knobs legal for the request's class are populated.

use serde::{Deserialize, Serialize};

// -- Request types --

/// Completion request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<WireMessage>,
    /// Sampling temperature (standard models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Output verbosity (reasoning models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<String>,
    /// Reasoning effort (reasoning models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<String>,
    /// Output-shape constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<WireResponseFormat>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// Tool selection policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<serde_json::Value>,
}

/// Response format constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireResponseFormat {
    /// Any valid JSON object
    JsonObject,
    /// Strict schema validation
    JsonSchema {
        /// Named schema with strictness flag
        json_schema: WireJsonSchema,
    },
}

/// Named JSON schema within a `json_schema` response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireJsonSchema {
    /// Schema name
    pub name: String,
    /// JSON Schema object
    pub schema: serde_json::Value,
    /// Enforce exact validation
    pub strict: bool,
}

/// Message within a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Message role
    pub role: String,
    /// Content (string or array of content parts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<WireContent>,
    /// Tool calls issued by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    /// Tool call ID this message responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Content, either a string or an array of parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireContent {
    /// Plain text content
    Text(String),
    /// Array of content parts
    Parts(Vec<WireContentPart>),
}

/// Individual content part
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireContentPart {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Image content via URL
    ImageUrl {
        /// Image URL specification
        image_url: WireImageUrl,
    },
}

/// Image URL specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImageUrl {
    /// Image URL or base64 data URI
    pub url: String,
    /// Detail level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: WireFunction,
}

/// Function specification within a tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Tool call within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    /// Unique tool call identifier
    pub id: String,
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function call details
    pub function: WireFunctionCall,
}

/// Function name and arguments within a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

// -- Response types --

/// Completion response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Generated choices
    pub choices: Vec<WireChoice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<WireUsage>,
}

/// Choice within a response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: WireChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireChoiceMessage {
    /// Role (always "assistant")
    pub role: String,
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    /// Refusal message when the model declines a constrained output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
    /// Reasoning-summary fragments, in response order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_summary: Option<Vec<String>>,
}

/// Token usage in a response
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WireUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_schema_format_serializes_with_type_tag() {
        let format = WireResponseFormat::JsonSchema {
            json_schema: WireJsonSchema {
                name: "math_response".into(),
                schema: serde_json::json!({"type": "object"}),
                strict: true,
            },
        };
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(value["type"], "json_schema");
        assert_eq!(value["json_schema"]["name"], "math_response");
        assert_eq!(value["json_schema"]["strict"], true);
    }

    #[test]
    fn json_object_format_is_a_bare_type_tag() {
        let value = serde_json::to_value(&WireResponseFormat::JsonObject).unwrap();
        assert_eq!(value, serde_json::json!({"type": "json_object"}));
    }

    #[test]
    fn response_parses_with_missing_optional_fields() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "hi"}
            }]
        });
        let response: WireResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("hi"));
        assert!(response.usage.is_none());
    }
}
