//! Rewrites machine-generated prose so it reads as if a person wrote it.
//!
//! The pipeline strips stock connectives and hedges, removes templated
//! sentence openers, swaps a random subset of words for near-synonyms from an
//! external dictionary, and finishes with casual word choices and punctuation
//! cleanup. Two guarantees hold throughout:
//!
//! * protected vocabulary (clinical terms by default) is never altered, and
//! * a trailing `References:` block comes back byte-for-byte.
//!
//! # Example
//!
//! ```ignore
//! use humanize::{HumanizeConfig, Humanizer, RewriteRequest};
//! use humanize::synonyms::{MockMode, MockSynonymSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let humanizer = Humanizer::new(
//!         HumanizeConfig::default(),
//!         Arc::new(MockSynonymSource::new(MockMode::Empty)),
//!     )?;
//!     let result = humanizer
//!         .humanize(&RewriteRequest::new("Furthermore, the doctor is very busy."))
//!         .await?;
//!     assert_eq!(result.humanized_text, "Also, the doctor is really busy.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod patterns;
pub mod pipeline;
pub mod references;
pub mod rules;
pub mod stats;
pub mod structure;
pub mod substitution;
pub mod synonyms;
pub mod tokenizer;
pub mod touch;
pub mod whitelist;

mod integration_tests;

pub use config::{HumanizeConfig, Limits, LookupConfig, RewriteProfile};
pub use data::{
    BatchFailure, BatchOutcome, Intensity, RewriteRequest, RewriteResult, Statistics, Style,
};
pub use error::{HumanizeError, HumanizeResult, LookupError, LookupResult};
pub use patterns::PatternEliminator;
pub use pipeline::Humanizer;
pub use references::{ContentSplit, ReferenceSplitter};
pub use rules::{PatternRule, Replacement, RuleSpec};
pub use structure::StructuralNormalizer;
pub use substitution::SubstitutionEngine;
pub use synonyms::{MockMode, MockSynonymSource, SynonymSource, WordsApiProvider};
pub use touch::HumanityTouch;
pub use whitelist::ProtectedTerms;
