//! Corpus tokenisation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // Letters, digits, combining marks, the modifier apostrophe (’), the
    // plus joiner and the Latin Extended-A block (ſ, ž, č, ...).
    static ref WORD_PATTERN: Regex = Regex::new(r"[\w’+\x{0100}-\x{017F}]+").unwrap();
}

/// A word as it appears in the corpus, with byte offsets into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'t> {
    pub text: &'t str,
    pub start: usize,
    pub end: usize,
}

/// Restartable tokeniser over a corpus string.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'t> {
    text: &'t str,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text }
    }

    /// Lazily scan the text; each call starts over from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = Token<'t>> + use<'t> {
        WORD_PATTERN.find_iter(self.text).map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
    }
}

impl<'t> IntoIterator for Tokenizer<'t> {
    type Item = Token<'t>;
    type IntoIter = Box<dyn Iterator<Item = Token<'t>> + 't>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Tokenise the whole corpus in one pass.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Tokenizer::new(text).iter().collect()
}
