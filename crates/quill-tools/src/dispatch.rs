//! Two-phase tool-calling exchange
//!
//! Phase one already happened: the caller holds a completion carrying tool
//! calls. This module executes the callables, republishes the assistant
//! turn and the results into the conversation, and performs the second
//! gateway pass for the final natural-language answer.
//!
//! Unknown tool policy: the batch is aborted before any callable runs. A
//! silently dropped tool name hides wiring bugs, and a partial result set
//! produces a second-pass conversation the API rejects anyway.

use quill_llm::{Completion, CompletionRequest, Conversation, Gateway, GatewayError, ToolResult};
use thiserror::Error;

use crate::registry::{ToolError, ToolRegistry};

/// Errors from the dispatch round
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Tool resolution or execution failed
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Second-pass gateway call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Resolve a first-pass completion, executing tool calls when present
///
/// When the completion carries no tool calls this is a no-op and the
/// first-pass completion is returned unchanged. Otherwise each call is
/// executed in issue order, one [`ToolResult`] is appended per call, and
/// the gateway is invoked a second time without tool definitions.
///
/// # Errors
///
/// Returns [`DispatchError::Tool`] when a tool cannot be resolved or
/// executed (the conversation is left untouched on an unknown name), or
/// [`DispatchError::Gateway`] when the second pass fails.
pub async fn dispatch(
    gateway: &Gateway,
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    request: &CompletionRequest,
    completion: Completion,
) -> Result<Completion, DispatchError> {
    let Some(calls) = completion.tool_calls() else {
        return Ok(completion);
    };
    let calls = calls.to_vec();
    let content = match &completion.outcome {
        quill_llm::Outcome::ToolCalls { content, .. } => content.clone(),
        quill_llm::Outcome::Text(_) | quill_llm::Outcome::Parsed(_) => None,
    };

    execute_calls(registry, conversation, content, &calls)?;

    // The model already has the results; offering the tools again would
    // invite another round.
    let mut second_pass = request.clone();
    second_pass.tools.clear();
    second_pass.tool_choice = None;

    let final_completion = gateway.complete(conversation, &second_pass).await?;
    Ok(final_completion)
}

/// Append the assistant turn and one tool result per call, in issue order
///
/// All names are resolved before any callable runs, so an unknown tool
/// aborts the batch with the conversation unchanged.
pub fn execute_calls(
    registry: &ToolRegistry,
    conversation: &mut Conversation,
    content: Option<String>,
    calls: &[quill_llm::ToolCall],
) -> Result<(), ToolError> {
    for call in calls {
        if !registry.contains(&call.name) {
            return Err(ToolError::UnknownTool {
                name: call.name.clone(),
            });
        }
    }

    conversation.push_assistant_turn(content, calls.to_vec());

    for call in calls {
        tracing::debug!(tool = %call.name, id = %call.id, "executing tool call");
        let output = registry.execute(&call.name, &call.arguments)?;
        let content = serde_json::to_string(&output).map_err(|e| ToolError::Execution {
            name: call.name.clone(),
            reason: e.to_string(),
        })?;
        conversation.push_tool_result(ToolResult {
            tool_call_id: call.id.clone(),
            content,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use quill_llm::ToolCall;

    use super::*;
    use crate::registry::Tool;

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::new("echo", "Echo the arguments", serde_json::json!({}), Ok));
        registry
    }

    fn call(id: &str, name: &str) -> ToolCall {
        ToolCall {
            id: id.into(),
            name: name.into(),
            arguments: r#"{"value": 1}"#.into(),
        }
    }

    #[test]
    fn results_follow_call_order() {
        let registry = echo_registry();
        let mut conversation = Conversation::question(None, "go");
        let calls = vec![call("call_a", "echo"), call("call_b", "echo"), call("call_c", "echo")];

        execute_calls(&registry, &mut conversation, None, &calls).unwrap();

        // 1 user + 1 assistant turn + 3 results
        assert_eq!(conversation.len(), 5);
        let ids: Vec<_> = conversation.messages()[2..]
            .iter()
            .map(|m| m.tool_call_id.clone().unwrap())
            .collect();
        assert_eq!(ids, ["call_a", "call_b", "call_c"]);
    }

    #[test]
    fn unknown_tool_aborts_batch() {
        let registry = echo_registry();
        let mut conversation = Conversation::question(None, "go");
        let calls = vec![call("call_a", "echo"), call("call_b", "missing")];

        let err = execute_calls(&registry, &mut conversation, None, &calls).unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "missing"));
        // Nothing was appended, including for the resolvable first call
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn assistant_turn_precedes_results() {
        let registry = echo_registry();
        let mut conversation = Conversation::question(None, "go");
        let calls = vec![call("call_a", "echo")];

        execute_calls(&registry, &mut conversation, Some("thinking".into()), &calls).unwrap();

        let assistant = &conversation.messages()[1];
        assert_eq!(assistant.role, quill_llm::Role::Assistant);
        assert_eq!(assistant.tool_calls.as_ref().unwrap().len(), 1);
    }
}
