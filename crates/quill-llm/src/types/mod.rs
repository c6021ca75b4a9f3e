//! Canonical types for conversations, requests, and completions
//!
//! These are provider-agnostic and serve as the normalized representation
//! the wire format converts to and from.

pub mod conversation;
pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use conversation::{Conversation, MAX_DOCUMENT_CHARS, TRUNCATION_MARKER, bound_document_text};
pub use message::{Content, ContentPart, ImageDetail, Message, Role, ToolCall, ToolResult};
pub use request::{
    CompletionRequest, GenerationProfile, ModelClass, OutputShape, ReasoningEffort, Verbosity,
};
pub use response::{Completion, Outcome, Usage};
pub use tool::{ToolChoice, ToolDefinition};
