//! Sentence extraction
//!
//! Splits raw book text into candidate sentences with a punctuation heuristic:
//! a boundary follows `.`, `!` or `?` when the terminator is followed by
//! whitespace and then a capital letter, a quotation mark, or an em-dash.
//! Runs of three periods are folded into a single placeholder first so an
//! ellipsis never ends a sentence.
//!
//! The order of the returned sentences is the canonical indexing used by
//! [`SelectionState`](crate::state::SelectionState).

pub mod rules;

use crate::error::{CoreError, Result};
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::fmt;

pub use rules::{OpenerTable, TermTable};

/// Default configuration constants
pub mod defaults {
    /// Sentences must be strictly longer than this many characters
    pub const MIN_LENGTH: usize = 20;

    /// Replacement for `...`
    pub const ELLIPSIS_PLACEHOLDER: char = '…';

    /// Run of periods folded into the placeholder
    pub const ELLIPSIS_PATTERN: &str = r"\.{3}";
}

/// A single extracted sentence, trimmed and longer than the minimum length
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    /// Sentence text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extractor settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Fragments with this many characters or fewer are dropped
    pub min_length: usize,
    /// Character substituted for every `...`
    pub ellipsis_placeholder: char,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_length: defaults::MIN_LENGTH,
            ellipsis_placeholder: defaults::ELLIPSIS_PLACEHOLDER,
        }
    }
}

/// Heuristic sentence splitter
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    terminators: TermTable,
    openers: OpenerTable,
    ellipsis: Regex,
}

impl Extractor {
    /// Create an extractor, rejecting a placeholder that is itself a terminator
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let terminators = TermTable::default();
        if terminators.is_terminator(config.ellipsis_placeholder)
            || config.ellipsis_placeholder.is_whitespace()
        {
            return Err(CoreError::InvalidConfig(format!(
                "ellipsis placeholder {:?} must not be a terminator or whitespace",
                config.ellipsis_placeholder
            )));
        }

        let ellipsis = Regex::new(defaults::ELLIPSIS_PATTERN)
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            config,
            terminators,
            openers: OpenerTable::default(),
            ellipsis,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Split `text` into sentences in source order
    ///
    /// Returns an empty vector for empty input or input with no fragment
    /// longer than the minimum length.
    pub fn extract(&self, text: &str) -> Vec<Sentence> {
        let mut buf = [0u8; 4];
        let placeholder: &str = self.config.ellipsis_placeholder.encode_utf8(&mut buf);
        let normalized = self.ellipsis.replace_all(text, NoExpand(placeholder));

        self.fragments(&normalized)
            .into_iter()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .filter(|fragment| fragment.chars().count() > self.config.min_length)
            .map(|fragment| Sentence(fragment.to_string()))
            .collect()
    }

    /// Raw fragments between boundaries, untrimmed
    fn fragments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut fragments = Vec::new();
        let mut start = 0;

        for (i, &(offset, ch)) in chars.iter().enumerate() {
            if !self.terminators.is_terminator(ch) {
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }

            // Need at least one whitespace character and then an opener
            if j == i + 1 || j >= chars.len() || !self.openers.opens_sentence(chars[j].1) {
                continue;
            }

            let end = offset + ch.len_utf8();
            fragments.push(&text[start..end]);
            start = end;
        }

        fragments.push(&text[start..]);
        fragments
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default()).expect("default extractor config is valid")
    }
}

/// Convenience wrapper around [`Extractor::default`]
pub fn extract(text: &str) -> Vec<Sentence> {
    Extractor::default().extract(text)
}
