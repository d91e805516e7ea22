//! WordsAPI provider for synonym lookups
//!
//! This module integrates with WordsAPI (served through RapidAPI) to fetch
//! synonyms for single words.
//!
//! # Authentication
//!
//! The provider loads the API key from the `WORDS_API_KEY` environment
//! variable, or from [`LookupConfig`]. Obtain a key from:
//! https://rapidapi.com/dpventures/api/wordsapi
//!
//! # Example
//!
//! ```ignore
//! use humanize::synonyms::{SynonymSource, WordsApiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = WordsApiProvider::from_env()?;
//!     let synonyms = provider.lookup("improve").await?;
//!     println!("{:?}", synonyms);
//!     Ok(())
//! }
//! ```

use crate::config::{DEFAULT_WORDS_API_HOST, DEFAULT_WORDS_API_URL, LookupConfig};
use crate::error::{LookupError, LookupResult};
use crate::synonyms::source::{SynonymSource, validate_word};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Body of `GET /words/{word}/synonyms`
#[derive(Debug, Deserialize)]
struct SynonymsResponse {
    #[serde(default)]
    synonyms: Vec<String>,
}

/// WordsAPI synonym provider
///
/// Communicates with WordsAPI over HTTPS. Every request is bounded by the
/// client timeout.
#[derive(Clone)]
pub struct WordsApiProvider {
    /// RapidAPI key for authentication
    api_key: String,
    /// Value of the `X-RapidAPI-Host` header
    host: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL, without trailing slash
    base_url: String,
    timeout_ms: u64,
}

impl WordsApiProvider {
    const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    /// Create a provider with an explicit API key and default endpoint
    ///
    /// # Arguments
    ///
    /// * `api_key` - RapidAPI key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(LookupError)` - If the key is empty or the HTTP client cannot be built
    pub fn new(api_key: String) -> LookupResult<Self> {
        Self::with_endpoint(
            api_key,
            DEFAULT_WORDS_API_URL.to_string(),
            DEFAULT_WORDS_API_HOST.to_string(),
            Self::DEFAULT_TIMEOUT_MS,
        )
    }

    /// Create a provider with every connection detail spelled out
    pub fn with_endpoint(
        api_key: String,
        base_url: String,
        host: String,
        timeout_ms: u64,
    ) -> LookupResult<Self> {
        if api_key.trim().is_empty() {
            return Err(LookupError::Config("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| LookupError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            host,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// Create a provider from a [`LookupConfig`]
    pub fn from_config(config: &LookupConfig) -> LookupResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LookupError::Config("WordsAPI key is not configured".to_string()))?;
        Self::with_endpoint(
            api_key,
            config.base_url.clone(),
            config.host.clone(),
            config.timeout_ms,
        )
    }

    /// Create a provider from the `WORDS_API_KEY` environment variable
    pub fn from_env() -> LookupResult<Self> {
        let api_key = std::env::var("WORDS_API_KEY").map_err(|_| {
            LookupError::Config("WORDS_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key)
    }

    fn synonyms_url(&self, word: &str) -> String {
        format!("{}/words/{}/synonyms", self.base_url, word.to_lowercase())
    }
}

impl std::fmt::Debug for WordsApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordsApiProvider")
            .field("api_key", &"***")
            .field("host", &self.host)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[async_trait]
impl SynonymSource for WordsApiProvider {
    async fn lookup(&self, word: &str) -> LookupResult<Vec<String>> {
        validate_word(word)?;

        let response = self
            .client
            .get(self.synonyms_url(word))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
            .map_err(|e| match LookupError::from(e) {
                LookupError::Timeout(_) => LookupError::Timeout(self.timeout_ms),
                other => other,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(word.to_string()));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: SynonymsResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(format!("Failed to parse response: {}", e)))?;

        Ok(body.synonyms)
    }

    fn source_name(&self) -> &str {
        "WordsAPI"
    }
}
