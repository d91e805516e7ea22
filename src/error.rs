//! Error types for the rewriting pipeline and its synonym lookups

use thiserror::Error;

/// Errors surfaced by the rewriting pipeline
///
/// Input errors (`EmptyText`, `TextTooShort`, `TextTooLong`) are raised before
/// any stage runs. `Processing` carries the untouched input so callers can
/// report it back without holding on to the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HumanizeError {
    /// Input text was missing or blank
    #[error("Text is required")]
    EmptyText,
    /// Input text is shorter than the configured minimum
    #[error("Text too short: must be at least {min} characters, got {actual}")]
    TextTooShort { min: usize, actual: usize },
    /// Input text is longer than the configured maximum
    #[error("Text too long: must not exceed {max} characters, got {actual}")]
    TextTooLong { max: usize, actual: usize },
    /// A batch request was empty or over the item limit
    #[error("Invalid batch request: {0}")]
    InvalidBatch(String),
    /// A rule pattern failed to compile
    #[error("Invalid rule pattern '{pattern}': {reason}")]
    InvalidRule { pattern: String, reason: String },
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
    /// Unexpected failure inside a pipeline stage
    #[error("Failed to humanize text: {message}")]
    Processing {
        message: String,
        original_text: String,
    },
}

impl HumanizeError {
    /// Stable machine-readable code, used by the HTTP front end
    pub fn code(&self) -> &'static str {
        match self {
            HumanizeError::EmptyText | HumanizeError::InvalidBatch(_) => "VALIDATION_ERROR",
            HumanizeError::TextTooShort { .. } => "TEXT_TOO_SHORT",
            HumanizeError::TextTooLong { .. } => "TEXT_TOO_LONG",
            HumanizeError::InvalidRule { .. } | HumanizeError::Config(_) => "INTERNAL_ERROR",
            HumanizeError::Processing { .. } => "PROCESSING_ERROR",
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HumanizeError::EmptyText
                | HumanizeError::TextTooShort { .. }
                | HumanizeError::TextTooLong { .. }
                | HumanizeError::InvalidBatch(_)
        )
    }

    pub(crate) fn processing(message: impl Into<String>, original_text: &str) -> Self {
        HumanizeError::Processing {
            message: message.into(),
            original_text: original_text.to_string(),
        }
    }
}

impl From<regex::Error> for HumanizeError {
    fn from(err: regex::Error) -> Self {
        HumanizeError::InvalidRule {
            pattern: String::new(),
            reason: err.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type HumanizeResult<T> = Result<T, HumanizeError>;

/// Errors from an external synonym source
///
/// These never leave the substitution stage: every variant degrades to
/// "keep the original word".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success HTTP status other than 404
    #[error("Lookup failed with HTTP status {status}: {message}")]
    Http { status: u16, message: String },
    /// The source does not know the word
    #[error("Word not found: {0}")]
    NotFound(String),
    /// The lookup did not answer in time
    #[error("Lookup timed out after {0} ms")]
    Timeout(u64),
    /// The response could not be parsed
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// The source is not usable (missing key, bad URL)
    #[error("Lookup configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout(0)
        } else if err.is_decode() {
            LookupError::Malformed(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

/// Result type for synonym lookups
pub type LookupResult<T> = Result<T, LookupError>;
