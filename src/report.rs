//! Plain-text and JSON results files for batch runs.

use crate::error::{Result, SearchError};
use crate::search::{HitList, SearchResult};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// Plain-text report: one block per query with the compiled pattern, then
/// one KWIC line per match or a note that nothing was found.
pub struct Report<'a> {
    results: &'a [(&'a str, &'a SearchResult)],
    context_words: usize,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [(&'a str, &'a SearchResult)], context_words: usize) -> Self {
        Self {
            results,
            context_words,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let multi = self.results.len() > 1;
        for (i, (query, result)) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if multi {
                writeln!(f, "Query: {query}")?;
            }
            writeln!(f, "Compiled pattern:\n{}\n", result.pattern)?;
            if result.matches.is_empty() {
                writeln!(f, "No matches found.")?;
                continue;
            }
            writeln!(f, "Matches ({} words of context on each side):\n", self.context_words)?;
            for line in &result.matches {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

pub fn render_report(results: &[(&str, &SearchResult)], context_words: usize) -> String {
    Report::new(results, context_words).to_string()
}

/// Write `contents` to `path`, creating parent directories as needed.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let to_write_error = |source| SearchError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, contents).map_err(to_write_error)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote results");
    Ok(())
}

pub fn write_report(path: &Path, results: &[(&str, &SearchResult)], context_words: usize) -> Result<()> {
    write_file(path, &render_report(results, context_words))
}

/// Write structured hits as pretty-printed JSON.
pub fn write_json(path: &Path, lists: &[HitList]) -> Result<()> {
    let json = serde_json::to_string_pretty(lists)?;
    write_file(path, &json)
}
