//! Protected vocabulary and the guarded replacement wrapper
//!
//! Every rule-driven stage edits text through [`ProtectedTerms::guarded_replace`],
//! so a protected word survives no matter which stage matches it.
//!
//! The one change a protected word can see is a capital first letter: when a
//! hedge or opener in front of it is deleted at the start of a sentence, the
//! word that now opens the sentence is capitalized.
//!
//! # Example
//!
//! ```ignore
//! use humanize::whitelist::ProtectedTerms;
//! use humanize::rules::{PatternRule, Replacement};
//!
//! let terms = ProtectedTerms::clinical();
//! let rule = PatternRule::new(r"\btreatment\b", Replacement::Literal("care"))?;
//! assert_eq!(terms.guarded_replace("The treatment worked", &rule), "The treatment worked");
//! ```

use crate::error::{HumanizeError, HumanizeResult};
use crate::rules::PatternRule;
use regex::Captures;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Clinical vocabulary protected by default
const CLINICAL_TERMS: &[&str] = &[
    // Healthcare professionals
    "doctor", "doctors", "physician", "physicians", "nurse", "nurses", "surgeon", "surgeons",
    "therapist", "therapists", "psychiatrist", "psychiatrists", "psychologist", "psychologists",
    "radiologist", "radiologists", "cardiologist", "cardiologists", "oncologist", "oncologists",
    "neurologist", "neurologists", "dermatologist", "dermatologists", "pediatrician",
    "pediatricians", "gynecologist", "gynecologists", "urologist", "urologists",
    "anesthesiologist", "anesthesiologists", "pharmacist", "pharmacists", "dentist", "dentists",
    "optometrist", "optometrists", "paramedic", "paramedics", "emt", "emts", "technician",
    "technicians",
    // General clinical terms
    "patient", "patients", "medical", "medicine", "medication", "medications", "drug", "drugs",
    "treatment", "treatments", "therapy", "therapies", "diagnosis", "diagnoses", "symptom",
    "symptoms", "disease", "diseases", "condition", "conditions", "syndrome", "syndromes",
    "disorder", "disorders", "infection", "infections", "virus", "viruses", "bacteria",
    "bacterial", "antibiotic", "antibiotics", "vaccine", "vaccines", "vaccination",
    "vaccinations", "immunization", "immunizations",
    // Anatomy
    "heart", "hearts", "lung", "lungs", "brain", "brains", "liver", "kidney", "kidneys",
    "stomach", "intestine", "intestines", "blood", "nerve", "nerves", "muscle", "muscles",
    "bone", "bones", "skin", "eye", "eyes", "ear", "ears", "nose", "mouth", "throat",
    // Procedures
    "surgery", "surgeries", "operation", "operations", "procedure", "procedures",
    "examination", "examinations", "test", "tests", "scan", "scans", "xray", "x-ray", "mri",
    "ct", "ultrasound", "biopsy", "biopsies",
    // Facilities
    "hospital", "hospitals", "clinic", "clinics", "emergency", "icu", "ward", "wards",
    "pharmacy", "pharmacies", "laboratory", "laboratories", "lab", "labs",
    // Measurements
    "dose", "doses", "dosage", "dosages", "mg", "ml", "cc", "units", "temperature", "pulse",
    "oxygen", "glucose", "cholesterol",
    // Pain and symptoms
    "pain", "ache", "aches", "fever", "nausea", "headache", "headaches", "migraine",
    "migraines", "fatigue", "dizziness", "swelling", "inflammation", "bleeding", "bruising",
    // Abbreviations
    "cpr", "ekg", "ecg", "iv", "er", "or", "rn", "md", "dds", "phd", "dvm",
];

/// Immutable set of words no rewriting stage may alter
#[derive(Debug, Clone, Default)]
pub struct ProtectedTerms {
    terms: HashSet<String>,
}

impl ProtectedTerms {
    /// An empty set; nothing is protected
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in clinical vocabulary
    pub fn clinical() -> Self {
        Self::from_terms(CLINICAL_TERMS.iter().copied())
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Add the terms of a newline-delimited file; `#` starts a comment line
    pub fn extend_from_file(mut self, path: &Path) -> HumanizeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HumanizeError::Config(format!(
                "Failed to read protected terms from '{}': {}",
                path.display(),
                e
            ))
        })?;
        self.terms.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(normalize)
                .filter(|t| !t.is_empty()),
        );
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Membership test after normalization (lowercase, letters/digits/hyphen only)
    pub fn is_protected(&self, word: &str) -> bool {
        let key = normalize(word);
        !key.is_empty() && self.terms.contains(&key)
    }

    /// Apply `rule` to every match whose first bare word is not protected
    pub fn guarded_replace(&self, text: &str, rule: &PatternRule) -> String {
        rule.regex
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                if let Some(word) = first_bare_word(matched) {
                    if self.is_protected(word) {
                        debug!(word, matched, "protected term left unchanged");
                        return matched.to_string();
                    }
                }
                rule.replacement.render(caps)
            })
            .into_owned()
    }

    /// Apply an ordered rule table through the guard
    pub fn apply_all(&self, text: &str, rules: &[PatternRule]) -> String {
        rules
            .iter()
            .fold(text.to_string(), |acc, rule| self.guarded_replace(&acc, rule))
    }
}

fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// First run of ASCII letters, digits or hyphens inside a match
fn first_bare_word(text: &str) -> Option<&str> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '-';
    let start = text.find(is_word)?;
    let rest = &text[start..];
    let end = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
    Some(&rest[..end])
}
