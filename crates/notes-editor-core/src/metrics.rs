//! Live word and character counts.

use serde::{Deserialize, Serialize};

/// Counts derived from the current document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Whitespace-delimited tokens in the trimmed text.
    pub word_count: usize,
    /// Chars in the text, whitespace included.
    pub char_count: usize,
}

impl Metrics {
    pub fn from_text(text: &str) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
        }
    }

    /// Status bar label, e.g. `4 words`.
    pub fn word_label(&self) -> String {
        format!("{} words", self.word_count)
    }

    /// Status bar label, e.g. `19 chars`.
    pub fn char_label(&self) -> String {
        format!("{} chars", self.char_count)
    }
}
