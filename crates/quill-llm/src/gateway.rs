//! Remote completion gateway
//!
//! Performs exactly one network call per [`Gateway::complete`] invocation.
//! Transport, authentication, and rate-limit failures are surfaced as
//! distinct error kinds and never retried here.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use schemars::JsonSchema;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use quill_config::Config;

use crate::convert::build_wire_request;
use crate::error::GatewayError;
use crate::observer::TransportObserver;
use crate::protocol::WireResponse;
use crate::types::{
    Completion, CompletionRequest, Conversation, Outcome, OutputShape, ToolCall,
};

/// Client for an OpenAI-compatible completion endpoint
pub struct Gateway {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    observer: Option<Arc<dyn TransportObserver>>,
}

impl Gateway {
    /// Create a gateway from resolved configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            observer: None,
        }
    }

    /// Inject a transport observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Perform one completion call
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] for a profile/class mismatch
    /// before any network traffic, [`GatewayError::Transport`] for network
    /// failures, [`GatewayError::Auth`] / [`GatewayError::RateLimited`] /
    /// [`GatewayError::Upstream`] for rejected requests, and
    /// [`GatewayError::SchemaViolation`] when a constrained output cannot
    /// be parsed.
    pub async fn complete(
        &self,
        conversation: &Conversation,
        request: &CompletionRequest,
    ) -> Result<Completion, GatewayError> {
        request.validate()?;

        let wire = build_wire_request(request, conversation);
        let url = self.completions_url();

        if let Some(observer) = &self.observer {
            let body = serde_json::to_value(&wire)
                .map_err(|e| GatewayError::Transport(format!("unserializable request: {e}")))?;
            observer.on_request("POST", &url, &body);
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "request failed");
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "credential rejected");
            return Err(GatewayError::Auth);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            tracing::warn!(?retry_after, "rate limited");
            return Err(GatewayError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "upstream returned error");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if let Some(observer) = &self.observer {
            observer.on_response(status.as_u16(), &body);
        }

        let wire_response: WireResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Upstream {
                status: status.as_u16(),
                body: format!("unparseable response: {e}"),
            })?;

        extract_completion(wire_response, &request.output)
    }

    /// Perform a schema-constrained call and deserialize the result
    ///
    /// The schema is derived from `T` and sent in strict mode; the parsed
    /// value is deserialized back into `T`.
    ///
    /// # Errors
    ///
    /// As [`Gateway::complete`]; additionally returns
    /// [`GatewayError::SchemaViolation`] when the parsed value does not
    /// deserialize into `T`.
    pub async fn complete_parsed<T>(
        &self,
        conversation: &Conversation,
        request: &CompletionRequest,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let schema = schemars::SchemaGenerator::default().into_root_schema_for::<T>();
        let mut schema = serde_json::to_value(schema)
            .map_err(|e| GatewayError::Configuration(format!("unserializable schema: {e}")))?;
        tighten_for_strict(&mut schema);

        let request = request.clone().with_output(OutputShape::JsonSchema {
            name: short_type_name::<T>(),
            schema,
            strict: true,
        });

        let completion = self.complete(conversation, &request).await?;
        match completion.outcome {
            Outcome::Parsed(value) => serde_json::from_value(value)
                .map_err(|e| GatewayError::SchemaViolation(e.to_string())),
            Outcome::Text(_) | Outcome::ToolCalls { .. } => Err(GatewayError::SchemaViolation(
                "expected a parsed structured value".to_owned(),
            )),
        }
    }
}

/// Prepare a generated schema for strict validation
///
/// Strict mode rejects generator metadata and open objects, so the
/// `$schema` and `title` keys are dropped and every object schema is
/// closed with `additionalProperties: false`. Recursion follows schema
/// positions only, never property names.
fn tighten_for_strict(schema: &mut serde_json::Value) {
    let Some(map) = schema.as_object_mut() else {
        return;
    };

    map.remove("$schema");
    map.remove("title");
    if map.contains_key("properties") {
        map.insert("additionalProperties".to_owned(), serde_json::Value::Bool(false));
    }

    if let Some(serde_json::Value::Object(properties)) = map.get_mut("properties") {
        for nested in properties.values_mut() {
            tighten_for_strict(nested);
        }
    }
    if let Some(items) = map.get_mut("items") {
        tighten_for_strict(items);
    }
    if let Some(serde_json::Value::Object(defs)) = map.get_mut("$defs") {
        for nested in defs.values_mut() {
            tighten_for_strict(nested);
        }
    }
}

/// Last path segment of a type name, used as the wire schema name
fn short_type_name<T>() -> String {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("schema")
        .to_owned()
}

/// Turn a wire response into a completion under the requested output shape
fn extract_completion(
    response: WireResponse,
    output: &OutputShape,
) -> Result<Completion, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::Transport("response contained no choices".to_owned()))?;

    let message = choice.message;
    let reasoning = message.reasoning_summary.unwrap_or_default();
    let usage = response.usage.map(Into::into);

    let calls: Vec<ToolCall> = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();

    if !calls.is_empty() {
        return Ok(Completion {
            outcome: Outcome::ToolCalls {
                content: message.content,
                calls,
            },
            reasoning,
            usage,
        });
    }

    let outcome = match output {
        OutputShape::Text => Outcome::Text(message.content.unwrap_or_default()),
        OutputShape::JsonObject | OutputShape::JsonSchema { .. } => {
            if let Some(refusal) = message.refusal {
                return Err(GatewayError::SchemaViolation(refusal));
            }
            let content = message.content.unwrap_or_default();
            let value = serde_json::from_str(&content)
                .map_err(|e| GatewayError::SchemaViolation(format!("invalid JSON output: {e}")))?;
            Outcome::Parsed(value)
        }
    };

    Ok(Completion {
        outcome,
        reasoning,
        usage,
    })
}
