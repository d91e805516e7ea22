//! Request and result types shared by the pipeline and its front ends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested writing style
///
/// Accepted and echoed back; the rewriting itself follows the configured
/// [`RewriteProfile`](crate::config::RewriteProfile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Academic,
    Casual,
    #[default]
    Professional,
    Creative,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Academic,
        Style::Casual,
        Style::Professional,
        Style::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Academic => "academic",
            Style::Casual => "casual",
            Style::Professional => "professional",
            Style::Creative => "creative",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Style::Academic => "Scholarly tone with formal language and proper structure",
            Style::Casual => "Conversational and approachable tone",
            Style::Professional => "Business-appropriate tone for workplace communication",
            Style::Creative => "Engaging style with vivid language and storytelling elements",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown style '{}'", s))
    }
}

/// Requested rewriting intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Subtle,
    Moderate,
    #[default]
    Aggressive,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Subtle, Intensity::Moderate, Intensity::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Subtle => "subtle",
            Intensity::Moderate => "moderate",
            Intensity::Aggressive => "aggressive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Intensity::Subtle => "Minimal changes, preserves original structure",
            Intensity::Moderate => "Balanced changes for natural flow",
            Intensity::Aggressive => "Significant restructuring and vocabulary changes",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intensity::ALL
            .into_iter()
            .find(|intensity| intensity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown intensity '{}'", s))
    }
}

/// A single rewrite request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub text: String,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub preserve_formatting: bool,
}

impl RewriteRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            intensity: None,
            preserve_formatting: false,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

/// Before/after measurements of one rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub original_word_count: usize,
    pub humanized_word_count: usize,
    /// Position-aligned word difference count, not a true edit distance
    pub changes_count: usize,
    pub readability_score: f64,
}

/// The outcome of a successful rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    pub original_text: String,
    pub humanized_text: String,
    pub style: Style,
    pub intensity: Intensity,
    /// Seconds spent in the pipeline
    pub processing_time: f64,
    pub statistics: Statistics,
}

/// One failed item of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub code: String,
    pub error: String,
}

/// Results of a batch rewrite; each item succeeds or fails independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<RewriteResult>,
    pub failed: Vec<BatchFailure>,
    pub total: usize,
}
