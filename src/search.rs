//! Search orchestration: compile, tokenise, match, filter, format.

use crate::config::SearchOptions;
use crate::error::{Result, SearchError};
use crate::kwic::format_context;
use crate::matcher::{TokenMatcher, apply_post_filters, find_matches};
use crate::pattern::compile;
use crate::tokenize::{Token, tokenize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Compiled pattern and one KWIC line per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub pattern: String,
    pub matches: Vec<String>,
}

/// A match with its offsets in the corpus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub index: usize,
    pub surface: String,
    pub start: usize,
    pub end: usize,
    pub context: String,
}

/// Structured search output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitList {
    pub query: String,
    pub pattern: String,
    pub hits: Vec<Hit>,
}

impl From<HitList> for SearchResult {
    fn from(list: HitList) -> Self {
        Self {
            pattern: list.pattern,
            matches: list.hits.into_iter().map(|h| h.context).collect(),
        }
    }
}

/// A corpus tokenised once and searched any number of times.
#[derive(Debug, Clone)]
pub struct Corpus<'t> {
    tokens: Vec<Token<'t>>,
}

impl<'t> Corpus<'t> {
    pub fn new(text: &'t str) -> Self {
        let tokens = tokenize(text);
        debug!(tokens = tokens.len(), bytes = text.len(), "tokenised corpus");
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token<'t>] {
        &self.tokens
    }

    pub fn search_hits(&self, query: &str, options: &SearchOptions) -> Result<HitList> {
        let pattern = compile(query);
        let matcher = TokenMatcher::new(&pattern, options.whole_word_only)?;

        let found = find_matches(&self.tokens, &matcher);
        let before_filters = found.len();
        let kept = apply_post_filters(found, &matcher, options);

        let hits: Vec<Hit> = kept
            .into_iter()
            .map(|m| Hit {
                index: m.index,
                surface: m.token.text.to_string(),
                start: m.token.start,
                end: m.token.end,
                context: format_context(m.index, &self.tokens, options.context_words),
            })
            .collect();

        info!(
            query,
            pattern = %pattern,
            matches = hits.len(),
            filtered = before_filters - hits.len(),
            "search complete"
        );

        Ok(HitList {
            query: query.to_string(),
            pattern: pattern.as_regex(),
            hits,
        })
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult> {
        self.search_hits(query, options).map(SearchResult::from)
    }
}

/// Search `corpus` for every historical spelling of `query`.
pub fn search(query: &str, corpus: &str, options: &SearchOptions) -> Result<SearchResult> {
    Corpus::new(corpus).search(query, options)
}

/// Run several queries against one corpus, tokenised once, in parallel.
///
/// Results come back in query order.
pub fn search_batch<S>(queries: &[S], corpus: &str, options: &SearchOptions) -> Vec<Result<SearchResult>>
where
    S: AsRef<str> + Sync,
{
    let corpus = Corpus::new(corpus);
    queries
        .par_iter()
        .map(|q| corpus.search(q.as_ref(), options))
        .collect()
}

/// Read a UTF-8 corpus file. A missing file is reported as
/// [`SearchError::SourceNotFound`].
pub fn read_corpus(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SearchError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => SearchError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Read the corpus at `path` and search it.
pub fn search_file(query: &str, path: &Path, options: &SearchOptions) -> Result<SearchResult> {
    let corpus = read_corpus(path)?;
    search(query, &corpus, options)
}
