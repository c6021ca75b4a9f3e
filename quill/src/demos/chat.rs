//! Chat completion demos: basic text, structured output, JSON mode,
//! strict schema, and two-phase tool calling

use quill_llm::{
    CompletionRequest, Conversation, Gateway, Outcome, OutputShape, ToolChoice,
};
use quill_tools::{Tool, ToolRegistry, dispatch};
use schemars::JsonSchema;
use serde::Deserialize;

use super::report;
use crate::console::Console;

/// Standard model used by this suite
const MODEL: &str = "gpt-4o";

/// Calendar event extracted from a natural-language request
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CalendarEvent {
    /// Event name
    pub name: String,
    /// Event date
    pub date: String,
    /// Participants in mention order
    pub participants: Vec<String>,
}

/// Run all chat demos
pub async fn run(console: &mut Console, gateway: &Gateway) {
    console.header("Basic Text Chat");
    let result = basic_text_chat(console, gateway).await;
    report(console, "basic_text_chat", result);

    console.header("Structured Response Model");
    let result = structured_response_model(console, gateway).await;
    report(console, "structured_response_model", result);

    console.header("Structured Response JSON Mode");
    let result = structured_response_json_mode(console, gateway).await;
    report(console, "structured_response_json_mode", result);

    console.header("Structured Response Strict Schema");
    let result = structured_response_strict_schema(console, gateway).await;
    report(console, "structured_response_strict_schema", result);

    console.header("Tool Calling");
    let result = tool_calling(console, gateway).await;
    report(console, "tool_calling", result);
}

/// Plain text completion from a one-line prompt
async fn basic_text_chat(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let conversation =
        Conversation::question(None, "Write a one-sentence bedtime story about a unicorn.");
    let request = CompletionRequest::deterministic(MODEL, 1.0);

    let completion = gateway.complete(&conversation, &request).await?;
    console.line(completion.text().unwrap_or_default());
    Ok(())
}

/// Schema derived from a Rust type, deserialized back into it
async fn structured_response_model(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let conversation = Conversation::question(
        Some("Extract the event information."),
        "Create a calendar event for a meeting with Alice and Bob on July 24th.",
    );
    let request = CompletionRequest::deterministic(MODEL, 0.0);

    let event: CalendarEvent = gateway.complete_parsed(&conversation, &request).await?;
    console.line(format!("{event:?}"));
    Ok(())
}

/// JSON mode: structure guided by the prompt, not enforced by schema
async fn structured_response_json_mode(
    console: &mut Console,
    gateway: &Gateway,
) -> anyhow::Result<()> {
    let conversation = Conversation::question(
        Some("Extract the event information as json with keys name, date, participants."),
        "Alice and Bob are meeting on July 24th, 2025.",
    );
    let request =
        CompletionRequest::deterministic(MODEL, 0.0).with_output(OutputShape::JsonObject);

    let completion = gateway.complete(&conversation, &request).await?;
    if let Outcome::Parsed(value) = &completion.outcome {
        console.line(serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Hand-written strict schema for a step-by-step math answer
async fn structured_response_strict_schema(
    console: &mut Console,
    gateway: &Gateway,
) -> anyhow::Result<()> {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "steps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "explanation": { "type": "string" },
                        "output": { "type": "string" },
                    },
                    "required": ["explanation", "output"],
                    "additionalProperties": false,
                },
            },
            "final_answer": { "type": "string" },
        },
        "required": ["steps", "final_answer"],
        "additionalProperties": false,
    });

    let conversation = Conversation::question(
        Some("You are a helpful math tutor. Guide the user through the solution step by step."),
        "how can I solve 8x + 7 = -23",
    );
    let request = CompletionRequest::deterministic(MODEL, 0.0).with_output(OutputShape::JsonSchema {
        name: "math_response".to_owned(),
        schema,
        strict: true,
    });

    let completion = gateway.complete(&conversation, &request).await?;
    if let Outcome::Parsed(value) = &completion.outcome {
        console.line(serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Simulated weather tool with discrete parameters
fn weather_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Tool::new(
        "get_weather",
        "Get the current weather for a location",
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "The city name" },
                "country": { "type": "string", "description": "The country name" },
            },
            "required": ["city", "country"],
            "additionalProperties": false,
        }),
        |args| {
            let city = args["city"].as_str().unwrap_or_default();
            let country = args["country"].as_str().unwrap_or_default();
            Ok(serde_json::json!({
                "location": format!("{city}, {country}"),
                "temperature": "72°F",
                "conditions": "Partly cloudy",
                "humidity": "65%",
            }))
        },
    ));
    registry
}

/// Two-phase tool calling: first pass issues calls, second pass answers
async fn tool_calling(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let registry = weather_registry();
    let mut conversation =
        Conversation::question(None, "What's the weather like in San Francisco, USA?");
    let request = CompletionRequest::deterministic(MODEL, 0.0)
        .with_tools(registry.definitions(), ToolChoice::Auto);

    let first_pass = gateway.complete(&conversation, &request).await?;

    if let Some(calls) = first_pass.tool_calls() {
        for call in calls {
            console.line(format!("Calling {}...", call.name));
        }
    }

    let final_completion =
        dispatch(gateway, &registry, &mut conversation, &request, first_pass).await?;
    console.line(final_completion.text().unwrap_or_default());
    Ok(())
}
