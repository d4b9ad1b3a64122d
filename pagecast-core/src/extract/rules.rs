//! Character tables for the boundary heuristic
//!
//! A boundary sits right after a terminator that is followed by at least one
//! whitespace character and then a sentence opener.

use std::collections::HashSet;

/// Default sentence-terminal characters
pub const DEFAULT_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Quotation marks that may open a new sentence
pub const DEFAULT_QUOTES: [char; 6] = ['"', '\'', '«', '„', '“', '‘'];

/// Em-dash, used to open dialogue lines
pub const EM_DASH: char = '—';

/// Terminator lookup table
#[derive(Debug, Clone)]
pub struct TermTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [bool; 128],
    /// Non-ASCII terminators (rare)
    non_ascii: HashSet<char>,
}

impl TermTable {
    /// Create from list of terminator characters
    pub fn new(terminators: impl IntoIterator<Item = char>) -> Self {
        let mut ascii_table = [false; 128];
        let mut non_ascii = HashSet::new();

        for ch in terminators {
            if ch.is_ascii() {
                ascii_table[ch as usize] = true;
            } else {
                non_ascii.insert(ch);
            }
        }

        Self {
            ascii_table,
            non_ascii,
        }
    }

    /// Check if character ends a sentence
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii.contains(&ch)
        }
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::new(DEFAULT_TERMINATORS)
    }
}

/// Classifies the first character after a terminator and its whitespace
#[derive(Debug, Clone)]
pub struct OpenerTable {
    quotes: HashSet<char>,
}

impl OpenerTable {
    /// Create from a set of opening quotation marks
    pub fn new(quotes: impl IntoIterator<Item = char>) -> Self {
        Self {
            quotes: quotes.into_iter().collect(),
        }
    }

    /// Capital letter, quotation mark, or em-dash
    #[inline]
    pub fn opens_sentence(&self, ch: char) -> bool {
        ch.is_uppercase() || ch == EM_DASH || self.quotes.contains(&ch)
    }
}

impl Default for OpenerTable {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTES)
    }
}
