//! Mock synonym source for testing
//!
//! This module provides a deterministic, API-free synonym source for testing
//! the substitution stage without requiring API keys or network access.
//!
//! # Example
//!
//! ```ignore
//! use humanize::synonyms::{MockMode, MockSynonymSource, SynonymSource};
//!
//! #[tokio::test]
//! async fn test_lookup() {
//!     let mock = MockSynonymSource::new(MockMode::Empty);
//!     assert!(mock.lookup("happy").await.unwrap().is_empty());
//! }
//! ```

use crate::error::{LookupError, LookupResult};
use crate::synonyms::source::SynonymSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Mock lookup modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Predefined lowercase word → candidates; unknown words get no candidates
    Mappings(HashMap<String, Vec<String>>),

    /// Return the word itself as the only candidate
    Echo,

    /// Every lookup succeeds with no candidates
    Empty,

    /// Every lookup fails with the given error
    Error(LookupError),

    /// Every lookup hangs until the caller gives up
    Timeout,
}

impl MockMode {
    /// Build a `Mappings` mode from borrowed pairs
    ///
    /// ```ignore
    /// let mode = MockMode::mappings(&[("improve", &["better", "enhance"])]);
    /// ```
    pub fn mappings(pairs: &[(&str, &[&str])]) -> Self {
        MockMode::Mappings(
            pairs
                .iter()
                .map(|(word, candidates)| {
                    (
                        word.to_lowercase(),
                        candidates.iter().map(|c| c.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Mock synonym source that simulates various provider behaviors
#[derive(Debug, Clone)]
pub struct MockSynonymSource {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    /// Per-word delays overriding `delay_ms`, to shuffle completion order
    word_delays: HashMap<String, u64>,
}

impl MockSynonymSource {
    /// Create a new MockSynonymSource with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            word_delays: HashMap::new(),
        }
    }

    /// Create a MockSynonymSource with simulated network delay
    ///
    /// # Arguments
    ///
    /// * `mode` - The lookup mode
    /// * `delay_ms` - Simulated delay in milliseconds
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            word_delays: HashMap::new(),
        }
    }

    /// Delay lookups of one word by a specific amount
    pub fn with_word_delay(mut self, word: &str, delay_ms: u64) -> Self {
        self.word_delays.insert(word.to_lowercase(), delay_ms);
        self
    }

    async fn apply_delay(&self, word: &str) {
        let delay = self
            .word_delays
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(self.delay_ms);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[async_trait]
impl SynonymSource for MockSynonymSource {
    async fn lookup(&self, word: &str) -> LookupResult<Vec<String>> {
        self.apply_delay(word).await;

        match &self.mode {
            MockMode::Mappings(map) => Ok(map
                .get(&word.to_lowercase())
                .cloned()
                .unwrap_or_default()),
            MockMode::Echo => Ok(vec![word.to_string()]),
            MockMode::Empty => Ok(Vec::new()),
            MockMode::Error(err) => Err(err.clone()),
            MockMode::Timeout => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
        }
    }

    fn source_name(&self) -> &str {
        "Mock Synonyms"
    }
}
