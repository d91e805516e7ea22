//! Reference Splitter
//!
//! Citation lists are structured data; rewording them corrupts them. The
//! splitter cuts a trailing `References:` block off before any rewriting and
//! reattaches it byte-for-byte afterwards.

use crate::error::HumanizeResult;
use regex::Regex;

/// Text split into the part that is rewritten and the part that is not
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentSplit {
    /// Rewritable content, trimmed
    pub content: String,
    /// Reference block from its heading to the end of the input; empty if none
    pub trailer: String,
}

impl ContentSplit {
    pub fn has_trailer(&self) -> bool {
        !self.trailer.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceSplitter {
    heading: Regex,
}

impl ReferenceSplitter {
    pub fn new() -> HumanizeResult<Self> {
        Ok(Self {
            heading: Regex::new(r"(?i)\breferences?:")?,
        })
    }

    /// Split at the last `Reference:`/`References:` heading
    ///
    /// # Example
    ///
    /// ```ignore
    /// let split = splitter.split("As described. References: Smith, J. (2020).");
    /// assert_eq!(split.content, "As described.");
    /// assert_eq!(split.trailer, "References: Smith, J. (2020).");
    /// ```
    pub fn split(&self, text: &str) -> ContentSplit {
        match self.heading.find_iter(text).last() {
            Some(heading) => ContentSplit {
                content: text[..heading.start()].trim().to_string(),
                trailer: text[heading.start()..].to_string(),
            },
            None => ContentSplit {
                content: text.trim().to_string(),
                trailer: String::new(),
            },
        }
    }

    /// Reattach `trailer` after a blank line, terminating `content` first
    pub fn recombine(&self, content: &str, trailer: &str) -> String {
        if trailer.is_empty() {
            return content.to_string();
        }
        if content.trim().is_empty() {
            return trailer.to_string();
        }
        let mut out = content.trim_end().to_string();
        if !out.ends_with(['.', '!', '?']) {
            out.push('.');
        }
        out.push_str("\n\n");
        out.push_str(trailer);
        out
    }
}
