//! Conversion between canonical types and the wire format

use crate::protocol::{
    WireContent, WireContentPart, WireFunction, WireFunctionCall, WireImageUrl, WireJsonSchema,
    WireMessage, WireRequest, WireResponseFormat, WireTool, WireToolCall, WireUsage,
};
use crate::types::{
    CompletionRequest, Content, ContentPart, Conversation, GenerationProfile, ImageDetail,
    Message, OutputShape, Role, ToolCall, ToolChoice, ToolDefinition, Usage,
};

/// Build the wire request for a conversation and call configuration
///
/// Exactly one of the temperature or verbosity/effort knob sets is
/// populated, according to the generation profile.
#[must_use]
pub fn build_wire_request(request: &CompletionRequest, conversation: &Conversation) -> WireRequest {
    let (temperature, verbosity, reasoning_effort) = match request.profile {
        GenerationProfile::Deterministic { temperature } => (Some(temperature), None, None),
        GenerationProfile::Reasoning { verbosity, effort } => (
            None,
            Some(verbosity.as_str().to_owned()),
            Some(effort.as_str().to_owned()),
        ),
    };

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(request.tools.iter().map(Into::into).collect())
    };

    WireRequest {
        model: request.model.clone(),
        messages: conversation.messages().iter().map(Into::into).collect(),
        temperature,
        verbosity,
        reasoning_effort,
        response_format: response_format(&request.output),
        tools,
        tool_choice: request.tool_choice.as_ref().map(tool_choice_value),
    }
}

/// Map an output shape to the wire `response_format` field
fn response_format(output: &OutputShape) -> Option<WireResponseFormat> {
    match output {
        OutputShape::Text => None,
        OutputShape::JsonObject => Some(WireResponseFormat::JsonObject),
        OutputShape::JsonSchema { name, schema, strict } => Some(WireResponseFormat::JsonSchema {
            json_schema: WireJsonSchema {
                name: name.clone(),
                schema: schema.clone(),
                strict: *strict,
            },
        }),
    }
}

/// Map a tool choice to its flexible wire representation
fn tool_choice_value(choice: &ToolChoice) -> serde_json::Value {
    match choice {
        ToolChoice::Auto => serde_json::Value::String("auto".into()),
        ToolChoice::None => serde_json::Value::String("none".into()),
        ToolChoice::Required => serde_json::Value::String("required".into()),
        ToolChoice::Forced(name) => serde_json::json!({
            "type": "function",
            "function": { "name": name },
        }),
    }
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };

        let content = match &message.content {
            Content::Text(text) => Some(WireContent::Text(text.clone())),
            Content::Parts(parts) => {
                Some(WireContent::Parts(parts.iter().map(Into::into).collect()))
            }
        };

        Self {
            role: role.to_owned(),
            content,
            tool_calls: message
                .tool_calls
                .as_ref()
                .map(|calls| calls.iter().map(Into::into).collect()),
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

impl From<&ContentPart> for WireContentPart {
    fn from(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Self::Text { text: text.clone() },
            ContentPart::Image { url, detail } => Self::ImageUrl {
                image_url: WireImageUrl {
                    url: url.clone(),
                    detail: Some(
                        match detail {
                            ImageDetail::Auto => "auto",
                            ImageDetail::Low => "low",
                            ImageDetail::High => "high",
                        }
                        .to_owned(),
                    ),
                },
            },
        }
    }
}

impl From<&ToolDefinition> for WireTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_owned(),
            function: WireFunction {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                parameters: Some(tool.parameters.clone()),
            },
        }
    }
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            tool_type: "function".to_owned(),
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}

impl From<WireToolCall> for ToolCall {
    fn from(call: WireToolCall) -> Self {
        Self {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        }
    }
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}
