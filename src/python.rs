//! Python bindings for the search front-end.

use crate::config::SearchOptions;
use crate::error::SearchError;
use crate::{normalize, pattern, search};
use pyo3::prelude::*;
use std::path::Path;

fn to_py_err(e: SearchError) -> PyErr {
    match e {
        SearchError::SourceNotFound { .. } => {
            pyo3::exceptions::PyFileNotFoundError::new_err(e.to_string())
        }
        SearchError::Read { .. } | SearchError::Write { .. } | SearchError::Input(_) => {
            pyo3::exceptions::PyIOError::new_err(e.to_string())
        }
        _ => pyo3::exceptions::PyValueError::new_err(e.to_string()),
    }
}

fn options(match_whole_word: bool, apply_post_filters: bool, apply_qu_rule: bool) -> SearchOptions {
    SearchOptions::default()
        .whole_word(match_whole_word)
        .post_filters(apply_post_filters)
        .qu_rule(apply_qu_rule)
}

/// Search result returned to Python
#[pyclass]
#[derive(Clone)]
struct SearchOutcome {
    #[pyo3(get)]
    regex: String,
    #[pyo3(get)]
    matches: Vec<String>,
}

impl From<search::SearchResult> for SearchOutcome {
    fn from(r: search::SearchResult) -> Self {
        Self {
            regex: r.pattern,
            matches: r.matches,
        }
    }
}

/// Search corpus text for every graphematic variant of a query
#[pyfunction]
#[pyo3(signature = (query, corpus_text, match_whole_word=false, apply_post_filters=false, apply_qu_rule=false))]
fn search_corpus(
    query: String,
    corpus_text: String,
    match_whole_word: bool,
    apply_post_filters: bool,
    apply_qu_rule: bool,
) -> PyResult<SearchOutcome> {
    let opts = options(match_whole_word, apply_post_filters, apply_qu_rule);
    search::search(&query, &corpus_text, &opts)
        .map(SearchOutcome::from)
        .map_err(to_py_err)
}

/// Search a UTF-8 corpus file, reading it entirely in Rust
#[pyfunction]
#[pyo3(signature = (query, file_path, match_whole_word=false, apply_post_filters=false, apply_qu_rule=false))]
fn search_corpus_file(
    query: String,
    file_path: String,
    match_whole_word: bool,
    apply_post_filters: bool,
    apply_qu_rule: bool,
) -> PyResult<SearchOutcome> {
    let opts = options(match_whole_word, apply_post_filters, apply_qu_rule);
    search::search_file(&query, Path::new(&file_path), &opts)
        .map(SearchOutcome::from)
        .map_err(to_py_err)
}

/// Batch search: tokenises the corpus once, queries run in parallel
#[pyfunction]
#[pyo3(signature = (queries, corpus_text, match_whole_word=false, apply_post_filters=false, apply_qu_rule=false))]
fn search_corpus_batch(
    py: Python<'_>,
    queries: Vec<String>,
    corpus_text: String,
    match_whole_word: bool,
    apply_post_filters: bool,
    apply_qu_rule: bool,
) -> PyResult<Vec<SearchOutcome>> {
    let opts = options(match_whole_word, apply_post_filters, apply_qu_rule);
    let results = py.detach(|| search::search_batch(&queries, &corpus_text, &opts));
    results
        .into_iter()
        .map(|r| r.map(SearchOutcome::from).map_err(to_py_err))
        .collect()
}

/// Compiled pattern for a query, as regex source
#[pyfunction]
fn generate_regex(query: String) -> String {
    pattern::compile(&query).as_regex()
}

/// Strip diacritics from vowels only
#[pyfunction]
fn normalize_vowels(text: String) -> String {
    normalize::normalize_vowels(&text)
}

#[pymodule]
fn rust_grapheme_search(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(search_corpus, m)?)?;
    m.add_function(wrap_pyfunction!(search_corpus_file, m)?)?;
    m.add_function(wrap_pyfunction!(search_corpus_batch, m)?)?;
    m.add_function(wrap_pyfunction!(generate_regex, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_vowels, m)?)?;
    m.add_class::<SearchOutcome>()?;
    Ok(())
}
