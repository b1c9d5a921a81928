//! File-to-file batch runs behind the `grapheme-search` binary.

use crate::config::SearchOptions;
use crate::error::{Result, SearchError};
use crate::report::{write_json, write_report};
use crate::search::{Corpus, read_corpus, search_batch};
use std::path::PathBuf;
use tracing::{error, warn};

/// Everything a batch run needs, already parsed.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub queries: Vec<String>,
    pub corpus: PathBuf,
    pub output: PathBuf,
    pub options: SearchOptions,
    pub json: bool,
}

/// Trim queries and drop blank ones. All blank is an error.
pub fn prepare_queries<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>> {
    let queries: Vec<String> = raw
        .iter()
        .map(|q| q.as_ref().trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect();
    if queries.is_empty() {
        warn!("no query given");
        return Err(SearchError::EmptyQuery);
    }
    Ok(queries)
}

/// Search the corpus file and write the results file.
pub fn run(request: &BatchRequest) -> Result<()> {
    let queries = prepare_queries(&request.queries)?;
    let corpus = read_corpus(&request.corpus)?;
    let options = &request.options;

    if request.json {
        let corpus = Corpus::new(&corpus);
        let lists = queries
            .iter()
            .map(|q| corpus.search_hits(q, options))
            .collect::<Result<Vec<_>>>()?;
        write_json(&request.output, &lists)
    } else {
        let results = search_batch(&queries, &corpus, options)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        let blocks: Vec<_> = queries.iter().map(String::as_str).zip(results.iter()).collect();
        write_report(&request.output, &blocks, options.context_words)
    }
}

/// Process exit status for a finished run: 0 on success, 1 on any failure.
pub fn exit_status(outcome: &Result<()>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "search failed");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn request(dir: &std::path::Path, queries: &[&str]) -> BatchRequest {
        BatchRequest {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            corpus: dir.join("corpus.txt"),
            output: dir.join("results.txt"),
            options: SearchOptions::default(),
            json: false,
        }
    }

    #[test]
    fn test_prepare_queries_trims() {
        let queries = prepare_queries(&["  ključ\n", "", "tvoj"]).unwrap();
        assert_eq!(queries, ["ključ", "tvoj"]);
    }

    #[test]
    fn test_blank_queries_rejected() {
        assert!(matches!(prepare_queries::<&str>(&[]), Err(SearchError::EmptyQuery)));
        assert!(matches!(prepare_queries(&["   ", "\n"]), Err(SearchError::EmptyQuery)));
    }

    #[test]
    fn test_missing_corpus_fails_with_status_one() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path(), &["ključ"]);
        let outcome = run(&req);
        assert!(matches!(outcome, Err(SearchError::SourceNotFound { .. })));
        assert_eq!(exit_status(&outcome), 1);
        assert!(!req.output.exists());
    }

    #[test]
    fn test_whitespace_query_fails_before_reading_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run(&request(dir.path(), &[" \t "]));
        assert!(matches!(outcome, Err(SearchError::EmptyQuery)));
        assert_eq!(exit_status(&outcome), 1);
    }

    #[test]
    fn test_successful_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(dir.path(), &["ključ"]);
        fs::write(&req.corpus, "On reçe: kljucz je tvoj.").unwrap();
        let outcome = run(&req);
        assert_eq!(exit_status(&outcome), 0);
        let written = fs::read_to_string(&req.output).unwrap();
        assert!(written.contains("On reçe [kljucz] je tvoj\n"));
    }

    #[test]
    fn test_json_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path(), &["tvoj"]);
        req.json = true;
        fs::write(&req.corpus, "On reçe: kljucz je tvoj.").unwrap();
        run(&req).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&req.output).unwrap()).unwrap();
        assert_eq!(value[0]["hits"][0]["surface"], "tvoj");
    }
}
