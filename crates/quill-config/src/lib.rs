//! Environment-backed configuration for quill
//!
//! Credentials are loaded exactly once at startup. A missing API key is a
//! fatal configuration error surfaced before any network call is made.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default API base URL when no override is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variables consulted for the API credential, in order
const API_KEY_VARS: [&str; 2] = ["QUILL_API_KEY", "OPENAI_API_KEY"];

/// Environment variables consulted for the base URL override, in order
const BASE_URL_VARS: [&str; 2] = ["QUILL_BASE_URL", "OPENAI_BASE_URL"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API credential present in the environment
    #[error("missing API key: set QUILL_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,

    /// Base URL override present but not a valid URL
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The offending value
        url: String,
        /// Parse failure detail
        reason: String,
    },
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API credential
    pub api_key: SecretString,
    /// Base URL for the completion endpoint
    pub base_url: Url,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// `QUILL_*` variables take precedence over their `OPENAI_*`
    /// equivalents. The base URL falls back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no credential variable is
    /// set, or [`ConfigError::InvalidBaseUrl`] if an override is present
    /// but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = first_env(&API_KEY_VARS).ok_or(ConfigError::MissingApiKey)?;

        let base_url = match first_env(&BASE_URL_VARS) {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
                url: raw,
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
        })
    }
}

/// First non-empty value among the given environment variables
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
