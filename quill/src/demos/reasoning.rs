//! Reasoning-model demos: speed tuning and summary extraction

use quill_llm::{CompletionRequest, Conversation, Gateway, ReasoningEffort, Verbosity};

use super::report;
use crate::console::Console;

/// Reasoning-capable model used by this suite
const MODEL: &str = "gpt-5-mini";

/// Run all reasoning demos
pub async fn run(console: &mut Console, gateway: &Gateway) {
    console.header("Reasoning One-shot");
    let result = one_shot(console, gateway).await;
    report(console, "one_shot", result);

    console.header("Reasoning with Summary");
    let result = with_summary(console, gateway).await;
    report(console, "with_summary", result);
}

/// Reasoning model tuned for speed: low verbosity, minimal effort
async fn one_shot(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let conversation = Conversation::question(
        Some("You are a helpful assistant."),
        "say hello and comment on the weather.",
    );
    let request = CompletionRequest::reasoning(MODEL, Verbosity::Low, ReasoningEffort::Minimal);

    let completion = gateway.complete(&conversation, &request).await?;
    console.line(completion.text().unwrap_or_default());
    Ok(())
}

/// Medium effort with the reasoning summary printed after the answer
async fn with_summary(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let conversation = Conversation::question(
        Some("You are a helpful math tutor. Guide the user through the solution step by step."),
        "how can I solve 8x + 7 = -23",
    );
    let request = CompletionRequest::reasoning(MODEL, Verbosity::Medium, ReasoningEffort::Medium);

    let completion = gateway.complete(&conversation, &request).await?;
    console.line(completion.text().unwrap_or_default());
    console.line("Summary:");
    console.line(completion.reasoning_summary());
    Ok(())
}
