//! Conversation assembly from plain inputs
//!
//! The builders here turn a question string, extracted document text, or
//! encoded images into a message sequence ready for transmission. Document
//! text is bounded to respect downstream token limits; the bound is
//! idempotent so re-applying it never shortens already-bounded text.

use serde::{Deserialize, Serialize};

use super::message::{ContentPart, ImageDetail, Message, ToolCall, ToolResult};

/// Character budget for embedded document text
pub const MAX_DOCUMENT_CHARS: usize = 400_000;

/// Marker appended when document text is cut at the budget
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length...]";

/// Ordered sequence of role-tagged messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Empty conversation
    #[must_use]
    pub const fn new() -> Self {
        Self { messages: Vec::new() }
    }

    /// Question with an optional system instruction
    #[must_use]
    pub fn question(system: Option<&str>, question: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        if let Some(system) = system {
            conversation.push(Message::system(system));
        }
        conversation.push(Message::user(question));
        conversation
    }

    /// Document analysis from extracted text
    ///
    /// Text is bounded to [`MAX_DOCUMENT_CHARS`] with a truncation marker
    /// appended when cut.
    #[must_use]
    pub fn document_text(source: &str, text: &str) -> Self {
        let bounded = bound_document_text(text);

        let mut conversation = Self::new();
        conversation.push(Message::system(
            "You are a helpful assistant that analyzes document content and provides clear, \
             concise summaries.",
        ));
        conversation.push(Message::user(format!(
            "Please analyze the following document content and provide a brief summary. \
             Focus on the main topics, key concepts, and overall purpose of the document.\n\n\
             Document: {source}\n\nContent:\n{bounded}\n\n\
             Please provide:\n\
             1. A brief overview of the document's purpose\n\
             2. Main topics and sections covered\n\
             3. Key concepts or important points\n\
             4. Target audience (if apparent)"
        )));
        conversation
    }

    /// Visual document analysis from rasterized pages
    ///
    /// Each page image is attached at high detail after a descriptive
    /// instruction.
    #[must_use]
    pub fn document_pages(source: &str, page_data_urls: &[String]) -> Self {
        let mut parts = vec![ContentPart::Text {
            text: format!(
                "Please analyze this document ({source}) by examining the visual content of \
                 its pages. Describe the document's purpose, any diagrams, charts, or tables \
                 present, how the information is organized, the key topics covered, and the \
                 apparent target audience."
            ),
        }];
        parts.extend(page_data_urls.iter().map(|url| ContentPart::Image {
            url: url.clone(),
            detail: ImageDetail::High,
        }));

        let mut conversation = Self::new();
        conversation.push(Message::system(
            "You are a helpful assistant with excellent visual analysis capabilities. You can \
             examine document layouts, diagrams, charts, and visual elements to provide \
             comprehensive document analysis.",
        ));
        conversation.push(Message::user_parts(parts));
        conversation
    }

    /// Image description from an encoded image
    #[must_use]
    pub fn image(source: &str, data_url: &str) -> Self {
        let mut conversation = Self::new();
        conversation.push(Message::system(
            "You are a helpful assistant with vision capabilities that can analyze images and \
             provide detailed descriptions.",
        ));
        conversation.push(Message::user_parts(vec![
            ContentPart::Text {
                text: format!(
                    "Please analyze this image ({source}) and provide a detailed description: \
                     what you see, the overall composition, any visible text, the apparent \
                     purpose or context, and notable colors or stylistic elements."
                ),
            },
            ContentPart::Image {
                url: data_url.to_owned(),
                detail: ImageDetail::High,
            },
        ]));
        conversation
    }

    /// Whether the conversation carries no messages
    ///
    /// Callers must skip the gateway call for an empty conversation (the
    /// empty-source policy).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Messages in order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append the assistant turn that issued the given tool calls, verbatim
    pub fn push_assistant_turn(&mut self, content: Option<String>, calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant_tool_calls(content, calls));
    }

    /// Append a tool result linked to its originating call
    pub fn push_tool_result(&mut self, result: ToolResult) {
        self.messages.push(Message::tool(result));
    }
}

/// Bound document text to the character budget
///
/// Truncated output is exactly [`MAX_DOCUMENT_CHARS`] characters including
/// the marker, so applying the bound twice produces no further change.
#[must_use]
pub fn bound_document_text(text: &str) -> String {
    let total = text.chars().count();
    if total <= MAX_DOCUMENT_CHARS {
        return text.to_owned();
    }

    let keep = MAX_DOCUMENT_CHARS - TRUNCATION_MARKER.chars().count();
    let mut bounded: String = text.chars().take(keep).collect();
    bounded.push_str(TRUNCATION_MARKER);
    bounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::{Content, Role};

    #[test]
    fn question_with_system_message() {
        let conversation = Conversation::question(Some("You are a helpful assistant."), "hello");
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role, Role::System);
        assert_eq!(conversation.messages()[1].role, Role::User);
    }

    #[test]
    fn question_without_system_message() {
        let conversation = Conversation::question(None, "hello");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::User);
    }

    #[test]
    fn short_text_passes_through_unchanged() {
        let text = "a short document";
        assert_eq!(bound_document_text(text), text);
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let text = "x".repeat(MAX_DOCUMENT_CHARS + 1000);
        let bounded = bound_document_text(&text);
        assert_eq!(bounded.chars().count(), MAX_DOCUMENT_CHARS);
        assert!(bounded.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn bound_is_idempotent() {
        let text = "y".repeat(MAX_DOCUMENT_CHARS * 2);
        let once = bound_document_text(&text);
        let twice = bound_document_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn bound_respects_multibyte_boundaries() {
        let text = "é".repeat(MAX_DOCUMENT_CHARS + 10);
        let bounded = bound_document_text(&text);
        assert_eq!(bounded.chars().count(), MAX_DOCUMENT_CHARS);
    }

    #[test]
    fn document_pages_attaches_high_detail_images() {
        let urls = vec!["data:image/png;base64,AAAA".to_owned(); 3];
        let conversation = Conversation::document_pages("report.pdf", &urls);
        assert_eq!(conversation.len(), 2);

        let Content::Parts(parts) = &conversation.messages()[1].content else {
            panic!("expected multipart user message");
        };
        assert_eq!(parts.len(), 4);
        let images = parts
            .iter()
            .filter(|p| matches!(p, ContentPart::Image { detail: ImageDetail::High, .. }))
            .count();
        assert_eq!(images, 3);
    }

    #[test]
    fn tool_round_trip_grows_conversation_by_results_plus_one() {
        let mut conversation = Conversation::question(None, "weather?");
        let first_pass_len = conversation.len();

        let calls = vec![
            ToolCall {
                id: "call_1".into(),
                name: "get_weather".into(),
                arguments: "{}".into(),
            },
            ToolCall {
                id: "call_2".into(),
                name: "get_weather".into(),
                arguments: "{}".into(),
            },
        ];
        conversation.push_assistant_turn(None, calls.clone());
        for call in &calls {
            conversation.push_tool_result(ToolResult {
                tool_call_id: call.id.clone(),
                content: "{}".into(),
            });
        }

        assert_eq!(conversation.len(), first_pass_len + 1 + 2);
        assert_eq!(
            conversation.messages()[first_pass_len + 1].tool_call_id.as_deref(),
            Some("call_1")
        );
        assert_eq!(
            conversation.messages()[first_pass_len + 2].tool_call_id.as_deref(),
            Some("call_2")
        );
    }
}
