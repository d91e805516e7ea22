//! Pipeline Orchestrator
//!
//! [`Humanizer`] owns every stage and runs them in a fixed order:
//!
//! ```text
//! Validate → SplitReferences → EliminatePatterns → NormalizeStructure
//!          → SubstituteLexical → HumanTouch → FinalCleanup → Recombine
//!          → ComputeStatistics
//! ```
//!
//! References are split off the raw input before any rule runs, so the
//! trailer is returned byte-for-byte. Everything a stage needs (rule tables,
//! protected terms, the synonym source) is built once in [`Humanizer::new`]
//! and shared read-only between requests.
//!
//! # Example
//!
//! ```ignore
//! use humanize::{HumanizeConfig, Humanizer, RewriteRequest};
//! use humanize::synonyms::WordsApiProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HumanizeConfig::default().apply_env()?;
//!     let source = Arc::new(WordsApiProvider::from_config(&config.lookup)?);
//!     let humanizer = Humanizer::new(config, source)?;
//!
//!     let result = humanizer
//!         .humanize(&RewriteRequest::new("Furthermore, the plan is very good."))
//!         .await?;
//!     println!("{}", result.humanized_text);
//!     Ok(())
//! }
//! ```

use crate::config::HumanizeConfig;
use crate::data::{BatchFailure, BatchOutcome, Intensity, RewriteRequest, RewriteResult, Style};
use crate::error::{HumanizeError, HumanizeResult};
use crate::patterns::PatternEliminator;
use crate::references::ReferenceSplitter;
use crate::stats;
use crate::structure::StructuralNormalizer;
use crate::substitution::SubstitutionEngine;
use crate::synonyms::SynonymSource;
use crate::touch::HumanityTouch;
use crate::whitelist::ProtectedTerms;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The rewriting pipeline
#[derive(Debug)]
pub struct Humanizer {
    config: HumanizeConfig,
    terms: ProtectedTerms,
    splitter: ReferenceSplitter,
    eliminator: PatternEliminator,
    normalizer: StructuralNormalizer,
    substitution: SubstitutionEngine,
    touch: HumanityTouch,
}

impl Humanizer {
    /// Build every stage from `config`
    ///
    /// # Arguments
    ///
    /// * `config` - Limits, rewrite profile, lookup settings
    /// * `source` - Synonym source used by the substitution stage
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Ready-to-use pipeline
    /// * `Err(HumanizeError)` - If the configuration is invalid, a rule fails
    ///   to compile, or the protected terms file cannot be read
    pub fn new(config: HumanizeConfig, source: Arc<dyn SynonymSource>) -> HumanizeResult<Self> {
        config.validate()?;

        let mut terms = ProtectedTerms::clinical();
        if let Some(path) = &config.protected_terms_file {
            terms = terms.extend_from_file(path)?;
        }
        info!(
            protected_terms = terms.len(),
            source = source.source_name(),
            "humanizer initialized"
        );

        let substitution =
            SubstitutionEngine::new(source, config.profile.clone(), &config.lookup);

        Ok(Self {
            terms,
            splitter: ReferenceSplitter::new()?,
            eliminator: PatternEliminator::new()?,
            normalizer: StructuralNormalizer::new()?,
            substitution,
            touch: HumanityTouch::new()?,
            config,
        })
    }

    /// Replace the protected vocabulary
    pub fn with_protected_terms(mut self, terms: ProtectedTerms) -> Self {
        self.terms = terms;
        self
    }

    pub fn config(&self) -> &HumanizeConfig {
        &self.config
    }

    pub fn protected_terms(&self) -> &ProtectedTerms {
        &self.terms
    }

    /// Check `text` against the configured length limits
    ///
    /// Length is counted in characters, not bytes.
    pub fn validate(&self, text: &str) -> HumanizeResult<()> {
        if text.trim().is_empty() {
            return Err(HumanizeError::EmptyText);
        }
        let actual = text.chars().count();
        let limits = &self.config.limits;
        if actual < limits.min_len {
            return Err(HumanizeError::TextTooShort {
                min: limits.min_len,
                actual,
            });
        }
        if actual > limits.max_len {
            return Err(HumanizeError::TextTooLong {
                max: limits.max_len,
                actual,
            });
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Rewrite one request
    ///
    /// Uses a generator seeded from `config.seed` when set, fresh entropy
    /// otherwise.
    pub async fn humanize(&self, request: &RewriteRequest) -> HumanizeResult<RewriteResult> {
        let mut rng = self.rng();
        self.humanize_with_rng(request, &mut rng).await
    }

    /// Rewrite one request with an injected random source
    pub async fn humanize_with_rng<R: Rng + Send + ?Sized>(
        &self,
        request: &RewriteRequest,
        rng: &mut R,
    ) -> HumanizeResult<RewriteResult> {
        self.validate(&request.text)?;

        let started = Instant::now();
        let style = request.style.unwrap_or_default();
        let intensity = request.intensity.unwrap_or_default();
        info!(
            chars = request.text.chars().count(),
            style = %style,
            intensity = %intensity,
            "humanizing text"
        );

        let humanized = self.run_stages(&request.text, rng).await?;
        let statistics = stats::compute(&request.text, &humanized);
        let processing_time = started.elapsed().as_secs_f64();

        info!(
            original_words = statistics.original_word_count,
            humanized_words = statistics.humanized_word_count,
            changes = statistics.changes_count,
            elapsed_ms = (processing_time * 1000.0) as u64,
            "humanization complete"
        );

        Ok(RewriteResult {
            original_text: request.text.clone(),
            humanized_text: humanized,
            style,
            intensity,
            processing_time,
            statistics,
        })
    }

    async fn run_stages<R: Rng + Send + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> HumanizeResult<String> {
        let split = self.splitter.split(text);

        let content = self.eliminator.apply(&split.content, &self.terms);
        let content = self.normalizer.apply(&content, &self.terms);
        let content = self
            .substitution
            .substitute(&content, &self.terms, rng)
            .await
            .map_err(|e| match e {
                HumanizeError::Processing { message, .. } => {
                    HumanizeError::processing(message, text)
                }
                other => other,
            })?;
        let content = self.touch.apply(&content, &self.terms);

        let mut content = self.normalizer.collapse_whitespace(&content);
        if content.is_empty() {
            warn!("rewriting removed all content, keeping the original");
            content = split.content.clone();
        }

        let humanized = self.splitter.recombine(&content, &split.trailer);
        if humanized.trim().is_empty() {
            return Err(HumanizeError::processing("Rewrite produced no text", text));
        }
        Ok(humanized)
    }

    /// Rewrite up to `max_batch_items` texts; each item succeeds or fails on its own
    ///
    /// Items are processed in order with one random source, so a seeded
    /// configuration makes the whole batch reproducible.
    pub async fn humanize_batch(
        &self,
        texts: &[String],
        style: Option<Style>,
        intensity: Option<Intensity>,
    ) -> HumanizeResult<BatchOutcome> {
        if texts.is_empty() {
            return Err(HumanizeError::InvalidBatch(
                "texts must be a non-empty array".to_string(),
            ));
        }
        let max = self.config.limits.max_batch_items;
        if texts.len() > max {
            return Err(HumanizeError::InvalidBatch(format!(
                "Maximum {} texts per batch",
                max
            )));
        }

        let mut rng = self.rng();
        let mut results = Vec::with_capacity(texts.len());
        let mut failed = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            let request = RewriteRequest {
                text: text.clone(),
                style,
                intensity,
                preserve_formatting: false,
            };
            match self.humanize_with_rng(&request, &mut rng).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(index, code = e.code(), error = %e, "batch item failed");
                    failed.push(BatchFailure {
                        index,
                        code: e.code().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchOutcome {
            results,
            failed,
            total: texts.len(),
        })
    }
}
