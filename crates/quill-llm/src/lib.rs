//! Typed client for an OpenAI-compatible completion API
//!
//! Provides the canonical conversation types, the wire protocol, and the
//! [`Gateway`] that performs exactly one network call per completion.
//! Retry policy, caching, and concurrency are explicitly the caller's
//! concern.

pub mod convert;
pub mod error;
pub mod gateway;
pub mod observer;
pub mod protocol;
pub mod types;

pub use error::GatewayError;
pub use gateway::Gateway;
pub use observer::{TracingObserver, TransportObserver};
pub use types::{
    Completion, CompletionRequest, Content, ContentPart, Conversation, GenerationProfile,
    ImageDetail, Message, ModelClass, Outcome, OutputShape, ReasoningEffort, Role, ToolCall,
    ToolChoice, ToolDefinition, ToolResult, Usage, Verbosity,
};
