//! Candidate selection tables and filtering
//!
//! A lookup returns whatever the dictionary knows; most of it is unusable in
//! running prose. These tables decide which words are worth looking up at all
//! and which of the returned candidates may replace the original.

use crate::config::RewriteProfile;
use crate::tokenizer::is_word_char;
use crate::whitelist::ProtectedTerms;

/// Function words never sent for lookup
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "am", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "can", "i", "you", "he", "she", "it", "we", "they",
    "me", "him", "her", "us", "them", "my", "your", "his", "their", "our", "this", "that",
    "these", "those", "here", "there", "where", "when", "why", "how", "what", "who", "which",
    "whose", "whom", "from", "up", "about", "into", "through", "during", "before", "after",
    "above", "below", "between", "among", "under", "over", "may", "might", "must",
];

/// Technical terms never sent for lookup
pub const TECHNICAL_PROTECTED: &[&str] = &[
    "vibe", "coding", "code", "api", "ui", "ux", "css", "html", "js", "react", "node", "npm",
    "git", "dev", "app", "web", "ai", "ml", "data", "json", "sql", "php", "python", "java",
];

/// Words whose candidates are limited to [`allowed_technical_synonyms`]
pub const TECHNICAL_WORDS: &[&str] = &[
    "coding", "programming", "development", "software", "framework", "language", "code",
    "developers", "digital", "technical", "environment", "workspace", "system", "application",
    "interface", "data", "algorithm", "function", "method", "process", "structure", "design",
    "build", "create", "implement", "execute", "run", "test", "debug", "expression", "often",
    "accompanied", "experience", "writing", "performance", "room", "some", "state", "flow",
];

/// Candidates that read as archaic, overly formal, or simply wrong
pub const AVOID_WORDS: &[&str] = &[
    "steganography", "cryptography", "ontogenesis", "misdirection", "edifice", "outturn",
    "curator", "divine", "beatniks", "roger", "whilst", "hitherto", "heretofore", "wherein",
    "whereby", "aforementioned", "pursuant", "notwithstanding", "subsequently", "nevertheless",
    "furthermore", "moreover", "therefore", "consequently", "utilize", "facilitate",
    "demonstrate", "establish", "acquire", "comprehensive", "substantial", "considerable",
    "optimal", "enhance", "augment", "ameliorate", "commence", "oft", "attended", "minimum",
    "foreclose", "merely", "receive", "functioning", "way", "around", "tell", "humanise",
    "array", "construction", "originative",
];

/// The only acceptable replacements for a technical word; empty means none
pub fn allowed_technical_synonyms(word: &str) -> &'static [&'static str] {
    match word {
        "coding" => &["programming"],
        "programming" => &["coding"],
        "development" => &["building"],
        "developers" => &["programmers", "coders"],
        "build" => &["create", "make"],
        "create" => &["make", "build"],
        "environment" => &["setting"],
        "framework" => &["structure"],
        "process" => &["method"],
        _ => &[],
    }
}

/// Whether a word token should be skipped before any random draw
pub fn is_skipped(word: &str, profile: &RewriteProfile, terms: &ProtectedTerms) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
        || TECHNICAL_PROTECTED.contains(&lower.as_str())
        || terms.is_protected(word)
        || word.chars().any(|c| c.is_ascii_digit())
        || word.chars().count() < profile.min_word_len
}

/// Reduce raw lookup candidates to the ones that may replace `word`
///
/// Rejects anything that would not tokenize as a single word (phrases,
/// hyphenated or punctuated forms), large length changes, technical-word
/// violations, avoid-list words, protected terms, and the word itself. When
/// any survivor is within `preferred_length_delta`, only those are returned.
pub fn filter_candidates(
    word: &str,
    candidates: &[String],
    profile: &RewriteProfile,
    terms: &ProtectedTerms,
) -> Vec<String> {
    let lower_word = word.to_lowercase();
    let word_len = word.chars().count();
    let technical = TECHNICAL_WORDS.contains(&lower_word.as_str());
    let delta = |candidate: &str| candidate.chars().count().abs_diff(word_len);

    let accepted: Vec<String> = candidates
        .iter()
        .filter(|candidate| {
            let lower = candidate.to_lowercase();
            if candidate.is_empty() || !candidate.chars().all(is_word_char) {
                return false;
            }
            if delta(candidate.as_str()) > profile.max_length_delta {
                return false;
            }
            if technical && !allowed_technical_synonyms(&lower_word).contains(&lower.as_str()) {
                return false;
            }
            !AVOID_WORDS.contains(&lower.as_str())
                && !terms.is_protected(candidate)
                && lower != lower_word
        })
        .cloned()
        .collect();

    let preferred: Vec<String> = accepted
        .iter()
        .filter(|candidate| delta(candidate.as_str()) <= profile.preferred_length_delta)
        .cloned()
        .collect();

    if preferred.is_empty() {
        accepted
    } else {
        preferred
    }
}

/// Carry the original's leading capital over to the substitute
///
/// A capitalized original yields a substitute with its first letter
/// uppercased and the rest lowercased; otherwise the substitute is unchanged.
pub fn preserve_case(original: &str, synonym: &str) -> String {
    let leading_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !leading_upper {
        return synonym.to_string();
    }
    let mut chars = synonym.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
