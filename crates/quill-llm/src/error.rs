use thiserror::Error;

/// Errors surfaced by the completion gateway
///
/// None of these are retried automatically; retry policy belongs to the
/// caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Generation profile does not match the model class
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure before or during the exchange
    #[error("transport error: {0}")]
    Transport(String),

    /// Credential rejected by the API
    #[error("authentication failed: credential rejected")]
    Auth,

    /// API refused the request due to rate limiting
    #[error("rate limited")]
    RateLimited {
        /// Seconds to wait, when the API reported one
        retry_after: Option<u64>,
    },

    /// API returned a non-success status outside the mapped kinds
    #[error("upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Structured output did not satisfy the requested schema
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}
