//! Structural Normalizer
//!
//! Strips sentence-opening templates anchored at the very start of the text,
//! then collapses whitespace. Runs after the
//! [`PatternEliminator`](crate::patterns::PatternEliminator), so each template
//! also accepts its contracted spelling.

use crate::error::HumanizeResult;
use crate::rules::{PatternRule, Replacement, RuleSpec, capitalize_first, compile};
use crate::whitelist::ProtectedTerms;
use regex::Regex;

pub const OPENERS: &[RuleSpec] = &[
    (
        r"^\s*it(?:\s+is|'s|’s)\s+important\s+to\s+note\s+that\s+",
        Replacement::Literal(""),
    ),
    (
        r"^\s*it(?:\s+is|'s|’s)\s+worth\s+noting\s+that\s+",
        Replacement::Literal(""),
    ),
    (
        r"^\s*in\s+today(?:'s|’s)\s+(?:fast-paced\s+|digital\s+|modern\s+)?world,\s*",
        Replacement::Literal(""),
    ),
    (r"^\s*as\s+an\s+ai\s+language\s+model,\s*", Replacement::Literal("")),
    (r"^\s*(?:in\s+conclusion|in\s+summary|overall),\s*", Replacement::Literal("")),
    (r"^\s*(?:certainly|absolutely|of\s+course)[!,]\s*", Replacement::Literal("")),
];

#[derive(Debug, Clone)]
pub struct StructuralNormalizer {
    openers: Vec<PatternRule>,
    whitespace: Regex,
}

impl StructuralNormalizer {
    pub fn new() -> HumanizeResult<Self> {
        Ok(Self {
            openers: compile(OPENERS)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.openers
    }

    /// Strip leading templates (stacked ones included) and normalize spacing
    pub fn apply(&self, text: &str, terms: &ProtectedTerms) -> String {
        let mut current = text.to_string();
        loop {
            let stripped = terms.apply_all(&current, &self.openers);
            if stripped == current {
                break;
            }
            current = capitalize_first(&stripped);
        }
        self.collapse_whitespace(&current)
    }

    /// Runs of whitespace become a single space; ends are trimmed
    pub fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        StructuralNormalizer::new()
            .unwrap()
            .apply(text, &ProtectedTerms::clinical())
    }

    #[test]
    fn test_strips_leading_template() {
        assert_eq!(
            normalize("It is important to note that the results vary."),
            "The results vary."
        );
        assert_eq!(
            normalize("It's important to note that the results vary."),
            "The results vary."
        );
    }

    #[test]
    fn test_only_anchored_at_start() {
        let text = "Results vary. In conclusion, more work is needed.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_stacked_openers() {
        assert_eq!(
            normalize("Certainly! In today's fast-paced world, teams move quickly."),
            "Teams move quickly."
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize("  Too   many\n\nspaces\there.  "),
            "Too many spaces here."
        );
    }

    #[test]
    fn test_untouched_text() {
        assert_eq!(normalize("Plain sentence."), "Plain sentence.");
    }

    #[test]
    fn test_opener_only_text_becomes_empty() {
        assert_eq!(normalize("Overall, "), "");
    }
}
