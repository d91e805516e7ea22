//! Humanity-Touch Pass
//!
//! A last set of casual word swaps, followed by punctuation and spacing
//! cleanup for anything earlier stages left behind.

use crate::error::HumanizeResult;
use crate::rules::{PatternRule, Replacement, RuleSpec, capitalize_first, compile};
use crate::whitelist::ProtectedTerms;
use regex::{Captures, Regex};

pub const CASUAL_SWAPS: &[RuleSpec] = &[
    (r"\bvery\b", Replacement::MatchCase("really")),
    (r"\bextremely\b", Replacement::MatchCase("really")),
    (r"\bquite\b", Replacement::MatchCase("pretty")),
    (r"\bshall\b", Replacement::MatchCase("will")),
    (r"\b(?:is|are)\s+able\s+to\b", Replacement::MatchCase("can")),
    (r"\bnumerous\b", Replacement::MatchCase("many")),
];

#[derive(Debug, Clone)]
pub struct HumanityTouch {
    swaps: Vec<PatternRule>,
    repeated_commas: Regex,
    repeated_periods: Regex,
    space_before_punct: Regex,
    whitespace: Regex,
}

impl HumanityTouch {
    pub fn new() -> HumanizeResult<Self> {
        Ok(Self {
            swaps: compile(CASUAL_SWAPS)?,
            repeated_commas: Regex::new(r",{2,}")?,
            repeated_periods: Regex::new(r"\.{2,}")?,
            space_before_punct: Regex::new(
                r"(?P<prev>\w)?\s+(?P<punct>[,.;:!?])(?P<next>\s*\d)?",
            )?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.swaps
    }

    /// Apply the casual swaps through the guard, then clean up
    pub fn apply(&self, text: &str, terms: &ProtectedTerms) -> String {
        let swapped = terms.apply_all(text, &self.swaps);
        self.cleanup(&swapped)
    }

    /// Punctuation and spacing repair; idempotent
    pub fn cleanup(&self, text: &str) -> String {
        let text = self.repeated_commas.replace_all(text, ",");
        let text = self.repeated_periods.replace_all(&text, ".");
        let text = self.space_before_punct.replace_all(&text, tighten_punct);
        let text = join_dashed_words(&text);
        let text = self.whitespace.replace_all(&text, " ");
        capitalize_first(text.trim())
    }
}

/// Drops whitespace before punctuation, except for a spaced `.`, `,` or `:`
/// between two numbers such as "3 . 5"
fn tighten_punct(caps: &Captures<'_>) -> String {
    let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let prev = caps.name("prev").map(|m| m.as_str()).unwrap_or_default();
    let punct = caps.name("punct").map(|m| m.as_str()).unwrap_or_default();
    let next = caps.name("next").map(|m| m.as_str()).unwrap_or_default();

    let numeric = prev.chars().all(|c| c.is_ascii_digit()) && !prev.is_empty();
    let numeric = numeric && next.trim_start().starts_with(|c: char| c.is_ascii_digit());
    if numeric && matches!(punct, "." | "," | ":") {
        return matched.to_string();
    }
    format!("{}{}{}", prev, punct, next)
}

/// An em or en dash directly between two word characters becomes a space
fn join_dashed_words(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_words = matches!(c, '\u{2014}' | '\u{2013}')
                && i > 0
                && chars.get(i + 1).is_some_and(|&next| is_word(next))
                && is_word(chars[i - 1]);
            if between_words { ' ' } else { c }
        })
        .collect()
}
