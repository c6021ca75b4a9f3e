use std::collections::HashMap;

use quill_llm::ToolDefinition;
use thiserror::Error;

/// Errors from tool resolution and execution
#[derive(Debug, Error)]
pub enum ToolError {
    /// Requested tool has no registered callable
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The unresolvable tool name
        name: String,
    },

    /// Arguments did not deserialize as JSON
    #[error("invalid arguments for `{name}`: {reason}")]
    InvalidArguments {
        /// Tool name
        name: String,
        /// Deserialization failure detail
        reason: String,
    },

    /// The callable itself failed
    #[error("tool `{name}` failed: {reason}")]
    Execution {
        /// Tool name
        name: String,
        /// Failure detail
        reason: String,
    },
}

/// Callable backing a tool: deserialized arguments in, JSON value out
pub type ToolFn = Box<dyn Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync>;

/// A tool definition paired with its local callable
pub struct Tool {
    definition: ToolDefinition,
    callable: ToolFn,
}

impl Tool {
    /// Create a tool from its definition and callable
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        callable: impl Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            definition: ToolDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
            callable: Box::new(callable),
        }
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Execute the callable with already-parsed arguments
    fn invoke(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        (self.callable)(arguments).map_err(|reason| ToolError::Execution {
            name: self.definition.name.clone(),
            reason,
        })
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Mapping from tool name to local callable
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool of the same name
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Definitions for every registered tool, for the request payload
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self.tools.values().map(|t| t.definition.clone()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Whether a tool name resolves
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a named tool with serialized arguments
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for an unregistered name,
    /// [`ToolError::InvalidArguments`] for malformed argument JSON, or
    /// [`ToolError::Execution`] when the callable fails.
    pub fn execute(&self, name: &str, arguments: &str) -> Result<serde_json::Value, ToolError> {
        let tool = self.tools.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_owned(),
        })?;

        let parsed: serde_json::Value =
            serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments {
                name: name.to_owned(),
                reason: e.to_string(),
            })?;

        tool.invoke(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_tool() -> Tool {
        Tool::new(
            "get_weather",
            "Get the current weather for a location",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string" },
                    "country": { "type": "string" },
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
        )
    }

    #[test]
    fn execute_builds_the_location_string() {
        let mut registry = ToolRegistry::new();
        registry.register(weather_tool());

        let result = registry
            .execute("get_weather", r#"{"city": "San Francisco", "country": "USA"}"#)
            .unwrap();
        assert_eq!(result["location"], "San Francisco, USA");
    }

    #[test]
    fn unknown_name_is_reported_as_such() {
        let registry = ToolRegistry::new();
        let err = registry.execute("get_weather", "{}").unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "get_weather"));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(weather_tool());
        let err = registry.execute("get_weather", "{not json").unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn definitions_are_stable_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(weather_tool());
        registry.register(Tool::new("a_tool", "first", serde_json::json!({}), |_| {
            Ok(serde_json::Value::Null)
        }));

        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["a_tool", "get_weather"]);
    }
}
