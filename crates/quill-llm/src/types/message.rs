use serde::{Deserialize, Serialize};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
    /// Tool result
    Tool,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Message content
    pub content: Content,
    /// Tool calls issued by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// ID of the tool call this message responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// System instruction message
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Content::Text(text.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Plain text user message
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Multipart user message (text plus image attachments)
    #[must_use]
    pub const fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: Content::Parts(parts),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Assistant turn carrying tool calls, republished as issued
    #[must_use]
    pub fn assistant_tool_calls(content: Option<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Text(content.unwrap_or_default()),
            tool_calls: Some(calls),
            tool_call_id: None,
        }
    }

    /// Tool message carrying a local execution result
    #[must_use]
    pub fn tool(result: ToolResult) -> Self {
        Self {
            role: Role::Tool,
            content: Content::Text(result.content),
            tool_calls: None,
            tool_call_id: Some(result.tool_call_id),
        }
    }
}

/// Message content, either plain text or structured parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text content
    Text(String),
    /// Array of content parts (text, images)
    Parts(Vec<ContentPart>),
}

/// Individual part within a multipart message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content block
    Text {
        /// The text string
        text: String,
    },
    /// Inline image attachment
    Image {
        /// URL or base64 data URI
        url: String,
        /// Fidelity hint for the vision model
        detail: ImageDetail,
    },
}

/// Detail/fidelity hint attached to image content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    /// Let the API decide
    #[default]
    Auto,
    /// Reduced fidelity, fewer tokens
    Low,
    /// Full fidelity
    High,
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call
    pub id: String,
    /// Name of the tool to invoke
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

/// Output of a local tool execution, linked to its originating call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result responds to
    pub tool_call_id: String,
    /// JSON-encoded output from the tool
    pub content: String,
}
