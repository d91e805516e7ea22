//! Before/after statistics
//!
//! These are coarse numbers for display, not linguistic measurements.
//! `changes_count` compares words by position, so a single inserted word
//! near the start counts every later word as changed.

use crate::data::Statistics;

const DEFAULT_READABILITY: f64 = 7.5;

/// Number of whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Position-aligned word difference between two texts, case-insensitive
pub fn changes_count(original: &str, humanized: &str) -> usize {
    let before: Vec<String> = original.split_whitespace().map(str::to_lowercase).collect();
    let after: Vec<String> = humanized.split_whitespace().map(str::to_lowercase).collect();

    let length_change = before.len().abs_diff(after.len());
    let differing = before
        .iter()
        .zip(&after)
        .filter(|(a, b)| a != b)
        .count();

    length_change + differing
}

/// Bucketed score from average sentence length; always within [6.5, 8.5]
pub fn readability_score(text: &str) -> f64 {
    let words = word_count(text);
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    if words == 0 || sentences == 0 {
        return DEFAULT_READABILITY;
    }

    let average = words as f64 / sentences as f64;
    if average < 15.0 {
        8.5
    } else if average < 20.0 {
        7.5
    } else {
        6.5
    }
}

/// Statistics for a finished rewrite
pub fn compute(original: &str, humanized: &str) -> Statistics {
    Statistics {
        original_word_count: word_count(original),
        humanized_word_count: word_count(humanized),
        changes_count: changes_count(original, humanized),
        readability_score: readability_score(humanized),
    }
}
