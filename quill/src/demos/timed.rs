//! Sequential timed comparison between model classes
//!
//! Runs the same prompt a fixed number of times against each class,
//! back-to-back on one thread, and reports summed wall-clock time. This is
//! a micro-benchmark of API latency, not a concurrency mechanism.

use std::time::Instant;

use quill_llm::{
    Completion, CompletionRequest, Conversation, Gateway, ReasoningEffort, Verbosity,
};

use super::report;
use crate::console::Console;

/// Runs per model class
const RUNS: u32 = 4;

/// Baseline standard model
const STANDARD_MODEL: &str = "gpt-4.1-mini";

/// Reasoning model tuned for speed
const REASONING_MODEL: &str = "gpt-5-mini";

/// Run the timed comparison
pub async fn run(console: &mut Console, gateway: &Gateway) {
    console.header("Timed Completion Comparison");
    let result = comparison(console, gateway).await;
    report(console, "timed_comparison", result);
}

/// Time `RUNS` sequential calls, returning the last completion
async fn timed_runs(
    gateway: &Gateway,
    conversation: &Conversation,
    request: &CompletionRequest,
) -> anyhow::Result<(Completion, u128)> {
    let start = Instant::now();
    let mut last = None;
    for _ in 0..RUNS {
        last = Some(gateway.complete(conversation, request).await?);
    }
    let elapsed_ms = start.elapsed().as_millis();
    // RUNS is nonzero, so at least one completion exists
    let completion = last.ok_or_else(|| anyhow::anyhow!("no runs executed"))?;
    Ok((completion, elapsed_ms))
}

async fn comparison(console: &mut Console, gateway: &Gateway) -> anyhow::Result<()> {
    let conversation = Conversation::question(
        Some("You are a helpful assistant."),
        "say hello and comment on the weather.",
    );

    let standard = CompletionRequest::deterministic(STANDARD_MODEL, 0.0);
    let (standard_completion, standard_ms) =
        timed_runs(gateway, &conversation, &standard).await?;

    let reasoning =
        CompletionRequest::reasoning(REASONING_MODEL, Verbosity::Low, ReasoningEffort::Minimal);
    let (reasoning_completion, reasoning_ms) =
        timed_runs(gateway, &conversation, &reasoning).await?;

    console.line(format!("{STANDARD_MODEL} response:"));
    console.line(standard_completion.text().unwrap_or_default());
    console.line(format!("total time for {RUNS} runs: {standard_ms} ms"));
    console.blank();

    console.line(format!("{REASONING_MODEL} response:"));
    console.line(reasoning_completion.text().unwrap_or_default());
    console.line(format!("total time for {RUNS} runs: {reasoning_ms} ms"));
    console.blank();

    if standard_ms > 0 && reasoning_ms > 0 {
        #[allow(clippy::cast_precision_loss)]
        let ratio = standard_ms as f64 / reasoning_ms as f64;
        if ratio > 1.0 {
            console.line(format!(
                "{REASONING_MODEL} is {ratio:.2}x faster than {STANDARD_MODEL}"
            ));
        } else {
            console.line(format!(
                "{STANDARD_MODEL} is {:.2}x faster than {REASONING_MODEL}",
                1.0 / ratio
            ));
        }
    }

    Ok(())
}
