//! Configuration for the rewriting pipeline
//!
//! All tables and limits are built once, before any request is served, and
//! are read-only afterwards. A configuration can come from defaults, from a
//! JSON file, and from environment variables layered on top:
//!
//! ```json
//! {
//!     "limits": { "min_len": 10, "max_len": 3000, "max_batch_items": 10 },
//!     "profile": { "substitution_probability": 0.65 },
//!     "lookup": { "timeout_ms": 10000, "max_concurrent_lookups": 16 },
//!     "protected_terms_file": "terms/clinical.txt",
//!     "seed": 42
//! }
//! ```
//!
//! Every section is optional; missing fields fall back to their defaults.

use crate::error::{HumanizeError, HumanizeResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MIN_LEN: usize = 10;
pub const DEFAULT_MAX_LEN: usize = 3000;
pub const DEFAULT_MAX_BATCH_ITEMS: usize = 10;
pub const DEFAULT_WORDS_API_URL: &str = "https://wordsapiv1.p.rapidapi.com";
pub const DEFAULT_WORDS_API_HOST: &str = "wordsapiv1.p.rapidapi.com";

/// Input bounds enforced by the Validate step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Minimum text length in characters (inclusive)
    pub min_len: usize,
    /// Maximum text length in characters (inclusive)
    pub max_len: usize,
    /// Maximum number of texts in one batch request
    pub max_batch_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS,
        }
    }
}

/// The parameter set the pipeline actually honors
///
/// Requests carry style and intensity labels, but the rewriting itself is
/// driven only by this profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteProfile {
    /// Chance that an eligible, even-ordinal word is sent for lookup
    pub substitution_probability: f64,
    /// Candidates differing from the source word by more characters are rejected
    pub max_length_delta: usize,
    /// Candidates within this delta are preferred when any exist
    pub preferred_length_delta: usize,
    /// Words shorter than this are never substituted
    pub min_word_len: usize,
}

impl Default for RewriteProfile {
    fn default() -> Self {
        Self {
            substitution_probability: 0.65,
            max_length_delta: 3,
            preferred_length_delta: 2,
            min_word_len: 4,
        }
    }
}

/// Settings for the external synonym source
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub host: String,
    pub timeout_ms: u64,
    pub max_concurrent_lookups: usize,
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WORDS_API_URL.to_string(),
            api_key: None,
            host: DEFAULT_WORDS_API_HOST.to_string(),
            timeout_ms: 10_000,
            max_concurrent_lookups: 16,
        }
    }
}

impl std::fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .finish()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizeConfig {
    pub limits: Limits,
    pub profile: RewriteProfile,
    pub lookup: LookupConfig,
    /// Newline-delimited list of extra protected terms
    pub protected_terms_file: Option<PathBuf>,
    /// Fixed seed for the substitution stage; `None` draws from entropy
    pub seed: Option<u64>,
    /// Include internal error messages in processing-error responses
    pub expose_error_details: bool,
}

impl HumanizeConfig {
    /// Load a configuration from a JSON file
    ///
    /// # Errors
    /// - File not found or unreadable
    /// - Invalid JSON or wrong field types
    /// - Values rejected by [`HumanizeConfig::validate`]
    pub fn from_file(path: &Path) -> HumanizeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HumanizeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config: HumanizeConfig = serde_json::from_str(&content).map_err(|e| {
            HumanizeError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Layer process environment variables over this configuration
    ///
    /// Recognized: `WORDS_API_KEY`, `WORDS_API_URL`, `HUMANIZE_SEED`,
    /// `HUMANIZE_MIN_LEN`, `HUMANIZE_MAX_LEN`.
    pub fn apply_env(self) -> HumanizeResult<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`HumanizeConfig::apply_env`] with an arbitrary variable source
    pub fn apply_vars<F>(mut self, get: F) -> HumanizeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = get("WORDS_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.lookup.api_key = Some(key);
        }
        if let Some(url) = get("WORDS_API_URL").filter(|u| !u.trim().is_empty()) {
            self.lookup.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(seed) = get("HUMANIZE_SEED") {
            self.seed = Some(parse_var("HUMANIZE_SEED", &seed)?);
        }
        if let Some(min) = get("HUMANIZE_MIN_LEN") {
            self.limits.min_len = parse_var("HUMANIZE_MIN_LEN", &min)?;
        }
        if let Some(max) = get("HUMANIZE_MAX_LEN") {
            self.limits.max_len = parse_var("HUMANIZE_MAX_LEN", &max)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> HumanizeResult<()> {
        if self.limits.min_len > self.limits.max_len {
            return Err(HumanizeError::Config(format!(
                "min_len ({}) exceeds max_len ({})",
                self.limits.min_len, self.limits.max_len
            )));
        }
        if self.limits.max_batch_items == 0 {
            return Err(HumanizeError::Config(
                "max_batch_items must be at least 1".to_string(),
            ));
        }
        let p = self.profile.substitution_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(HumanizeError::Config(format!(
                "substitution_probability must be within [0, 1], got {}",
                p
            )));
        }
        if self.profile.preferred_length_delta > self.profile.max_length_delta {
            return Err(HumanizeError::Config(
                "preferred_length_delta cannot exceed max_length_delta".to_string(),
            ));
        }
        if self.lookup.max_concurrent_lookups == 0 {
            return Err(HumanizeError::Config(
                "max_concurrent_lookups must be at least 1".to_string(),
            ));
        }
        if self.lookup.timeout_ms == 0 {
            return Err(HumanizeError::Config(
                "lookup timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> HumanizeResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| HumanizeError::Config(format!("{} has an invalid value: '{}'", name, value)))
}
