use serde::{Deserialize, Serialize};

use super::tool::{ToolChoice, ToolDefinition};
use crate::error::GatewayError;

/// Model capability class
///
/// Determines which generation profile is legal; the gateway rejects
/// mismatches instead of silently correcting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelClass {
    /// Conventional sampling model, configured via temperature
    Standard,
    /// Reasoning-capable model, configured via verbosity and effort
    Reasoning,
}

/// Output verbosity for reasoning models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Minimal output overhead
    Low,
    /// Balanced
    Medium,
    /// Expansive output
    High,
}

impl Verbosity {
    /// Wire-format string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Reasoning effort level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Shortest thinking time
    Minimal,
    /// Reduced thinking time
    Low,
    /// Balanced
    Medium,
    /// Maximum thinking time
    High,
}

impl ReasoningEffort {
    /// Wire-format string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Generation profile, exclusive per model class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProfile {
    /// Fixed sampling temperature, no reasoning knobs
    Deterministic {
        /// Sampling temperature (0.0 for fully deterministic output)
        temperature: f64,
    },
    /// Verbosity plus reasoning effort, no temperature
    Reasoning {
        /// Output verbosity
        verbosity: Verbosity,
        /// Thinking-time budget
        effort: ReasoningEffort,
    },
}

/// Output-shape constraint for the completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputShape {
    /// Free text
    Text,
    /// Any valid JSON object; structure guided by the prompt only
    JsonObject,
    /// Output must validate against the given JSON schema
    JsonSchema {
        /// Schema name reported to the API
        name: String,
        /// JSON Schema object
        schema: serde_json::Value,
        /// Enforce exact validation server-side
        strict: bool,
    },
}

/// Configuration for a single completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Capability class of the model
    pub class: ModelClass,
    /// Generation profile (must match the class)
    pub profile: GenerationProfile,
    /// Output-shape constraint
    pub output: OutputShape,
    /// Tool definitions available to the model
    pub tools: Vec<ToolDefinition>,
    /// How the model should select tools
    pub tool_choice: Option<ToolChoice>,
}

impl CompletionRequest {
    /// Deterministic request against a standard model
    #[must_use]
    pub fn deterministic(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            class: ModelClass::Standard,
            profile: GenerationProfile::Deterministic { temperature },
            output: OutputShape::Text,
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Reasoning request against a reasoning-capable model
    #[must_use]
    pub fn reasoning(model: impl Into<String>, verbosity: Verbosity, effort: ReasoningEffort) -> Self {
        Self {
            model: model.into(),
            class: ModelClass::Reasoning,
            profile: GenerationProfile::Reasoning { verbosity, effort },
            output: OutputShape::Text,
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Override the model class, e.g. when the caller knows better than the
    /// constructor defaults
    #[must_use]
    pub const fn with_class(mut self, class: ModelClass) -> Self {
        self.class = class;
        self
    }

    /// Constrain the output shape
    #[must_use]
    pub fn with_output(mut self, output: OutputShape) -> Self {
        self.output = output;
        self
    }

    /// Attach tool definitions with a selection policy
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>, choice: ToolChoice) -> Self {
        self.tools = tools;
        self.tool_choice = Some(choice);
        self
    }

    /// Check that the generation profile matches the model class
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when reasoning knobs are
    /// applied to a standard model or a temperature to a reasoning model.
    pub fn validate(&self) -> Result<(), GatewayError> {
        match (self.class, &self.profile) {
            (ModelClass::Standard, GenerationProfile::Reasoning { .. }) => {
                Err(GatewayError::Configuration(format!(
                    "model `{}` does not support reasoning: use a deterministic profile",
                    self.model
                )))
            }
            (ModelClass::Reasoning, GenerationProfile::Deterministic { .. }) => {
                Err(GatewayError::Configuration(format!(
                    "model `{}` is a reasoning model: temperature is not a valid knob",
                    self.model
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_profiles_validate() {
        assert!(CompletionRequest::deterministic("gpt-4.1-mini", 0.0).validate().is_ok());
        assert!(
            CompletionRequest::reasoning("gpt-5-mini", Verbosity::Low, ReasoningEffort::Minimal)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn reasoning_profile_on_standard_model_is_rejected() {
        let request = CompletionRequest::reasoning("gpt-5-mini", Verbosity::Low, ReasoningEffort::Minimal)
            .with_class(ModelClass::Standard);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[test]
    fn temperature_on_reasoning_model_is_rejected() {
        let request =
            CompletionRequest::deterministic("gpt-5-mini", 0.0).with_class(ModelClass::Reasoning);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }
}
