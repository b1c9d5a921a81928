//! Error types for corpus search

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Corpus file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read query: {0}")]
    Input(#[source] io::Error),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to encode results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty query: nothing to search for")]
    EmptyQuery,
}

pub type Result<T> = std::result::Result<T, SearchError>;
