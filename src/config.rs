//! Per-search configuration.

use serde::{Deserialize, Serialize};

/// Number of context words shown on each side of a match by default.
pub const DEFAULT_CONTEXT_WORDS: usize = 3;

/// Options passed once per search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Pattern must cover the whole token instead of any substring of it.
    pub whole_word_only: bool,
    /// Drop tokenisation noise and enforce the syllabic-r rule.
    pub enable_post_filters: bool,
    /// Accept `q` only when followed by `u` or `v`.
    pub enable_qu_rule: bool,
    /// KWIC window size on each side of the matched token.
    pub context_words: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            whole_word_only: false,
            enable_post_filters: false,
            enable_qu_rule: false,
            context_words: DEFAULT_CONTEXT_WORDS,
        }
    }
}

impl SearchOptions {
    pub fn whole_word(mut self, on: bool) -> Self {
        self.whole_word_only = on;
        self
    }

    pub fn post_filters(mut self, on: bool) -> Self {
        self.enable_post_filters = on;
        self
    }

    pub fn qu_rule(mut self, on: bool) -> Self {
        self.enable_qu_rule = on;
        self
    }

    pub fn context_words(mut self, words: usize) -> Self {
        self.context_words = words;
        self
    }
}
