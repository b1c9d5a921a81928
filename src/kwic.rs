//! Keyword-in-context lines.

use crate::tokenize::Token;
use serde::Serialize;
use std::fmt;

/// A matched token with its clipped left and right neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KwicLine<'t> {
    pub left: Vec<&'t str>,
    pub keyword: &'t str,
    pub right: Vec<&'t str>,
}

impl<'t> KwicLine<'t> {
    /// Context for the token at `index`, or `None` if the index is out of range.
    pub fn new(index: usize, tokens: &[Token<'t>], window: usize) -> Option<Self> {
        let keyword = tokens.get(index)?.text;
        let left = &tokens[index.saturating_sub(window)..index];
        let right_end = index.saturating_add(1).saturating_add(window).min(tokens.len());
        let right = &tokens[index + 1..right_end];
        Some(Self {
            left: left.iter().map(|t| t.text).collect(),
            keyword,
            right: right.iter().map(|t| t.text).collect(),
        })
    }
}

impl fmt::Display for KwicLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.left {
            write!(f, "{word} ")?;
        }
        write!(f, "[{}]", self.keyword)?;
        for word in &self.right {
            write!(f, " {word}")?;
        }
        Ok(())
    }
}

/// Render the context line for the token at `index`.
///
/// Windows are clipped at the corpus edges. An out-of-range index yields
/// an empty string.
pub fn format_context(index: usize, tokens: &[Token<'_>], window: usize) -> String {
    KwicLine::new(index, tokens, window)
        .map(|line| line.to_string())
        .unwrap_or_default()
}
