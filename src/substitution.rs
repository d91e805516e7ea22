//! Lexical Substitution Engine
//!
//! Replaces a random subset of content words with near-synonyms from a
//! [`SynonymSource`]. Work is split into three phases:
//!
//! 1. **Select** - walk the word tokens in order and draw from the RNG for
//!    every eligible even-ordinal word.
//! 2. **Scatter** - one lookup task per selected token on a `JoinSet`,
//!    bounded by a semaphore and a per-lookup timeout.
//! 3. **Gather** - collect every answer keyed by token position, then filter
//!    and pick candidates in token order.
//!
//! All RNG draws happen outside the concurrent phase, so a seeded generator
//! produces the same output no matter in which order lookups complete.
//!
//! # Example
//!
//! ```ignore
//! use humanize::substitution::SubstitutionEngine;
//! use humanize::synonyms::{MockMode, MockSynonymSource};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let source = Arc::new(MockSynonymSource::new(MockMode::Empty));
//! let engine = SubstitutionEngine::new(source, RewriteProfile::default(), &LookupConfig::default());
//! let mut rng = StdRng::seed_from_u64(7);
//! let text = engine.substitute("Teams improve quickly", &terms, &mut rng).await?;
//! ```

use crate::config::{LookupConfig, RewriteProfile};
use crate::error::{HumanizeError, HumanizeResult, LookupError};
use crate::synonyms::{SynonymSource, filter_candidates, is_skipped, preserve_case};
use crate::tokenizer::{Token, reassemble, tokenize};
use crate::whitelist::ProtectedTerms;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub struct SubstitutionEngine {
    source: Arc<dyn SynonymSource>,
    profile: RewriteProfile,
    timeout: Duration,
    max_concurrent: usize,
}

impl SubstitutionEngine {
    pub fn new(
        source: Arc<dyn SynonymSource>,
        profile: RewriteProfile,
        lookup: &LookupConfig,
    ) -> Self {
        Self {
            source,
            profile,
            timeout: lookup.timeout(),
            max_concurrent: lookup.max_concurrent_lookups.max(1),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Token indices chosen for lookup, in token order
    fn select<R: Rng + ?Sized>(
        &self,
        tokens: &[Token],
        terms: &ProtectedTerms,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut selected = Vec::new();
        let mut ordinal = 0usize;

        for (idx, token) in tokens.iter().enumerate() {
            if !token.is_word() {
                continue;
            }
            let current = ordinal;
            ordinal += 1;

            if is_skipped(&token.text, &self.profile, terms) || current % 2 != 0 {
                continue;
            }
            if rng.gen_bool(self.profile.substitution_probability) {
                selected.push(idx);
            }
        }

        selected
    }

    /// Rewrite `text`, keeping every token whose lookup fails or yields nothing
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The text with zero or more words substituted
    /// * `Err(HumanizeError::Processing)` - If a lookup task panicked
    pub async fn substitute<R: Rng + ?Sized>(
        &self,
        text: &str,
        terms: &ProtectedTerms,
        rng: &mut R,
    ) -> HumanizeResult<String> {
        let mut tokens = tokenize(text);
        let selected = self.select(&tokens, terms, rng);
        if selected.is_empty() {
            return Ok(text.to_string());
        }
        debug!(
            selected = selected.len(),
            source = self.source.source_name(),
            "dispatching synonym lookups"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set: JoinSet<(usize, Vec<String>)> = JoinSet::new();

        for &idx in &selected {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let word = tokens[idx].text.clone();
            let timeout = self.timeout;

            join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return (idx, Vec::new());
                };
                let candidates = match tokio::time::timeout(timeout, source.lookup(&word)).await
                {
                    Ok(Ok(candidates)) => candidates,
                    Ok(Err(LookupError::NotFound(_))) => {
                        debug!(word = %word, "no dictionary entry");
                        Vec::new()
                    }
                    Ok(Err(e)) => {
                        warn!(
                            word = %word,
                            source = source.source_name(),
                            error = %e,
                            "synonym lookup failed, keeping original"
                        );
                        Vec::new()
                    }
                    Err(_) => {
                        warn!(
                            word = %word,
                            source = source.source_name(),
                            timeout_ms = timeout.as_millis() as u64,
                            "synonym lookup timed out, keeping original"
                        );
                        Vec::new()
                    }
                };
                (idx, candidates)
            });
        }

        let mut gathered: Vec<Option<Vec<String>>> = vec![None; tokens.len()];
        while let Some(joined) = join_set.join_next().await {
            let (idx, candidates) = joined.map_err(|e| {
                HumanizeError::processing(format!("Synonym lookup task failed: {}", e), text)
            })?;
            gathered[idx] = Some(candidates);
        }

        for (idx, slot) in gathered.into_iter().enumerate() {
            let Some(candidates) = slot else {
                continue;
            };
            let original = &tokens[idx].text;
            let usable = filter_candidates(original, &candidates, &self.profile, terms);
            if let Some(choice) = usable.choose(rng) {
                let replacement = preserve_case(original, choice);
                debug!(original = %original, replacement = %replacement, "substituted word");
                tokens[idx].text = replacement;
            }
        }

        Ok(reassemble(&tokens))
    }
}

impl std::fmt::Debug for SubstitutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstitutionEngine")
            .field("source", &self.source.source_name())
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("max_concurrent", &self.max_concurrent)
            .finish()
    }
}
