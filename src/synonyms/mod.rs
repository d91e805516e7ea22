/// Synonym Lookup Module
///
/// This module provides the external lexical source used by the substitution
/// stage, together with the tables that decide which words are looked up and
/// which candidates are acceptable.
///
/// # Overview
///
/// 1. **Source Trait** - [`SynonymSource`], the async seam every provider implements
/// 2. **WordsAPI Provider** - HTTP implementation backed by WordsAPI
/// 3. **Mock Source** - Deterministic, network-free source for tests and `--mock`
/// 4. **Filter** - Stop words, technical allow-lists, avoid list, case handling
///
/// # Example
///
/// ```ignore
/// use humanize::synonyms::{filter_candidates, SynonymSource, WordsApiProvider};
/// use humanize::{ProtectedTerms, RewriteProfile};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = WordsApiProvider::from_env()?;
///     let raw = provider.lookup("improve").await?;
///     let usable = filter_candidates(
///         "improve",
///         &raw,
///         &RewriteProfile::default(),
///         &ProtectedTerms::clinical(),
///     );
///     println!("{:?}", usable);
///     Ok(())
/// }
/// ```
pub mod filter;
pub mod mock;
pub mod source;
pub mod words_api;

pub use filter::{filter_candidates, is_skipped, preserve_case};
pub use mock::{MockMode, MockSynonymSource};
pub use source::{SynonymSource, validate_word};
pub use words_api::WordsApiProvider;
