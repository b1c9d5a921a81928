//! Batch search over a corpus file.
//!
//! ```bash
//! grapheme-search življenje kršćanin --corpus corpus.txt --output results.txt
//! ```
//!
//! With no query arguments the query is read from stdin.

use clap::Parser;
use rust_grapheme_search::batch::{self, BatchRequest};
use rust_grapheme_search::{Result, SearchError, SearchOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Search a historical corpus for every graphematic variant of a word
#[derive(Parser, Debug)]
#[command(name = "grapheme-search")]
#[command(about = "Search a historical corpus for every graphematic variant of a word")]
struct Args {
    /// Words in modern standard orthography (prompted for when omitted)
    queries: Vec<String>,

    /// UTF-8 corpus file
    #[arg(long, default_value = "corpus.txt", env = "GRAPHEME_CORPUS")]
    corpus: PathBuf,

    /// Results file
    #[arg(short, long, default_value = "results.txt", env = "GRAPHEME_OUTPUT")]
    output: PathBuf,

    /// Match whole words only
    #[arg(long)]
    whole_word: bool,

    /// Drop tokenisation noise and apply the syllabic-r rule
    #[arg(long)]
    post_filters: bool,

    /// Only accept q before u or v
    #[arg(long)]
    qu_rule: bool,

    /// Words of context on each side of a match
    #[arg(long, default_value_t = rust_grapheme_search::config::DEFAULT_CONTEXT_WORDS)]
    context: usize,

    /// Write structured hits as JSON instead of KWIC text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> SearchOptions {
        SearchOptions::default()
            .whole_word(self.whole_word)
            .post_filters(self.post_filters)
            .qu_rule(self.qu_rule)
            .context_words(self.context)
    }

    fn into_request(self) -> Result<BatchRequest> {
        let options = self.options();
        let queries = if self.queries.is_empty() {
            vec![prompt_query()?]
        } else {
            self.queries
        };
        Ok(BatchRequest {
            queries,
            corpus: self.corpus,
            output: self.output,
            options,
            json: self.json,
        })
    }
}

fn prompt_query() -> Result<String> {
    print!("Enter a query (e.g. 'življen'): ");
    io::stdout().flush().map_err(SearchError::Input)?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(SearchError::Input)?;
    Ok(line)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rust_grapheme_search=info,grapheme_search=info")),
        )
        .with_writer(io::stderr)
        .init();

    let outcome = Args::parse().into_request().and_then(|request| {
        batch::run(&request)?;
        println!("Results written to '{}'.", request.output.display());
        Ok(())
    });
    if let Err(e) = &outcome {
        eprintln!("{e}");
    }
    ExitCode::from(batch::exit_status(&outcome))
}
