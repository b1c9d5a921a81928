//! Graphematic corpus search.
//!
//! Translates a word in modern standard orthography into a pattern that
//! matches every historical spelling of it, then finds and contextualises
//! the matching words in a corpus.
//!
//! ```
//! use rust_grapheme_search::{search, SearchOptions};
//!
//! let result = search("ključ", "On reçe: kljucz je tvoj.", &SearchOptions::default()).unwrap();
//! assert_eq!(result.matches, ["On reçe [kljucz] je tvoj"]);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod kwic;
pub mod matcher;
pub mod normalize;
pub mod pattern;
pub mod report;
pub mod rules;
pub mod search;
pub mod tokenize;

#[cfg(feature = "python")]
mod python;

pub use config::SearchOptions;
pub use error::{Result, SearchError};
pub use kwic::format_context;
pub use matcher::{MatchResult, TokenMatcher, find_matches};
pub use normalize::normalize_vowels;
pub use pattern::{Pattern, compile};
pub use rules::{RULE_TABLE, RuleTable};
pub use search::{Corpus, Hit, HitList, SearchResult, read_corpus, search, search_batch, search_file};
pub use tokenize::{Token, Tokenizer, tokenize};
