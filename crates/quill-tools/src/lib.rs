//! Local tool execution for the two-phase tool-calling exchange
//!
//! The model's first pass produces tool calls; the dispatcher executes the
//! matching local callables, republishes the results into the
//! conversation, and drives the second gateway pass for the final answer.

pub mod dispatch;
pub mod registry;

pub use dispatch::{DispatchError, dispatch};
pub use registry::{Tool, ToolError, ToolRegistry};
