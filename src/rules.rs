//! Data-driven rewrite rules
//!
//! A stage is an ordered slice of [`RuleSpec`]s compiled once into
//! [`PatternRule`]s. Order matters: later rules see the output of earlier
//! ones, so each stage keeps its table as a plain array that tests can
//! inspect directly.

use crate::error::{HumanizeError, HumanizeResult};
use regex::{Captures, Regex};

/// How a matched span is rewritten
#[derive(Clone, Copy)]
pub enum Replacement {
    /// Inserted exactly as written
    Literal(&'static str),
    /// First letter follows the first letter of the match; a `tail` capture
    /// group, when present, is carried over after the replacement
    MatchCase(&'static str),
    /// Computed from the captures
    With(fn(&Captures<'_>) -> String),
}

impl Replacement {
    pub fn render(&self, caps: &Captures<'_>) -> String {
        match self {
            Replacement::Literal(text) => text.to_string(),
            Replacement::MatchCase(text) => {
                let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                let mut out = match_case(matched, text);
                if let Some(tail) = caps.name("tail") {
                    out.push_str(tail.as_str());
                }
                out
            }
            Replacement::With(f) => f(caps),
        }
    }
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Replacement::Literal(text) => write!(f, "Literal({:?})", text),
            Replacement::MatchCase(text) => write!(f, "MatchCase({:?})", text),
            Replacement::With(_) => f.write_str("With(fn)"),
        }
    }
}

/// Uncompiled rule: a case-insensitive pattern and its replacement
pub type RuleSpec = (&'static str, Replacement);

/// A compiled rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub replacement: Replacement,
}

impl PatternRule {
    /// Compile a single pattern; matching is always case-insensitive
    pub fn new(pattern: &str, replacement: Replacement) -> HumanizeResult<Self> {
        let regex = Regex::new(&format!("(?i){}", pattern)).map_err(|e| {
            HumanizeError::InvalidRule {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { regex, replacement })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compile a rule table, preserving its order
pub fn compile(specs: &[RuleSpec]) -> HumanizeResult<Vec<PatternRule>> {
    specs
        .iter()
        .map(|(pattern, replacement)| PatternRule::new(pattern, *replacement))
        .collect()
}

/// Give `replacement` the leading-letter case of `matched`
pub fn match_case(matched: &str, replacement: &str) -> String {
    let leading_upper = matched
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(|c| c.is_uppercase());
    if leading_upper {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

/// Uppercase the first alphabetic character, leaving the rest alone
pub fn capitalize_first(text: &str) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((idx, c)) if c.is_lowercase() => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..idx]);
            out.extend(c.to_uppercase());
            out.push_str(&text[idx + c.len_utf8()..]);
            out
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Furthermore", "also"), "Also");
        assert_eq!(match_case("furthermore", "also"), "also");
        assert_eq!(match_case("IT IS", "it's"), "It's");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("hello world"), "Hello world");
        assert_eq!(capitalize_first("\"quoted\" text"), "\"Quoted\" text");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("123"), "123");
    }

    #[test]
    fn test_rule_is_case_insensitive() {
        let rule = PatternRule::new(r"\bvery\b", Replacement::Literal("really")).unwrap();
        assert!(rule.regex.is_match("VERY good"));
        assert!(rule.regex.is_match("Very good"));
        assert!(!rule.regex.is_match("every day"));
    }

    #[test]
    fn test_match_case_carries_tail() {
        let rule = PatternRule::new(r"\bfurthermore\b(?P<tail>,?)", Replacement::MatchCase("also"))
            .unwrap();
        let out = rule
            .regex
            .replace_all("Furthermore, it works", |caps: &Captures<'_>| {
                rule.replacement.render(caps)
            });
        assert_eq!(out, "Also, it works");
    }

    #[test]
    fn test_invalid_pattern_reports_source() {
        match PatternRule::new(r"(unclosed", Replacement::Literal("")) {
            Err(HumanizeError::InvalidRule { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("Expected InvalidRule, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_preserves_order() {
        let specs: &[RuleSpec] = &[
            (r"\bone\b", Replacement::Literal("1")),
            (r"\btwo\b", Replacement::Literal("2")),
        ];
        let rules = compile(specs).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].pattern().contains("one"));
        assert!(rules[1].pattern().contains("two"));
    }
}
