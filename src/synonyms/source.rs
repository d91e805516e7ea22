//! Synonym source trait
//!
//! This module defines the `SynonymSource` trait for provider abstraction,
//! so the substitution stage can run against WordsAPI, a mock, or anything
//! else that can answer "what are the synonyms of this word".
//!
//! # Example
//!
//! ```ignore
//! use humanize::synonyms::{SynonymSource, WordsApiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = WordsApiProvider::from_env()?;
//!     let synonyms = provider.lookup("happy").await?;
//!     println!("{:?}", synonyms); // ["felicitous", "glad", ...]
//!     Ok(())
//! }
//! ```

use crate::error::LookupResult;
use async_trait::async_trait;

/// Generic trait for synonym lookup providers
///
/// Implementations may fail freely; the substitution stage treats every error
/// as "no candidates" and keeps the original word.
#[async_trait]
pub trait SynonymSource: Send + Sync {
    /// Look up candidate synonyms for a single word
    ///
    /// # Arguments
    ///
    /// * `word` - The word as it appears in the text (any case)
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Candidates in provider order; may be empty
    /// * `Err(LookupError)` - If the lookup failed
    async fn lookup(&self, word: &str) -> LookupResult<Vec<String>>;

    /// Name of the provider, used in logs
    fn source_name(&self) -> &str;
}

/// Validate that a word is safe to send to a lookup service
///
/// Only single words made of alphanumerics, hyphens, apostrophes or
/// underscores are accepted.
pub fn validate_word(word: &str) -> LookupResult<()> {
    use crate::error::LookupError;

    if word.trim().is_empty() {
        return Err(LookupError::Config("Word is empty".to_string()));
    }

    if !word
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '\'' || c == '_')
    {
        return Err(LookupError::Config(format!(
            "Invalid characters in word: {}",
            word
        )));
    }

    Ok(())
}
