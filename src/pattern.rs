//! Query -> search pattern compiler.
//!
//! A query is cut into phonemes by greedy longest match against the rule
//! table. Each phoneme becomes an alternation group over its historical
//! spellings; the groups are kept as structured [`Segment`]s and only
//! serialised to regex syntax at the end.

use crate::normalize::{is_vowel, normalize_vowels};
use crate::rules::{RULE_TABLE, RuleTable};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::ops::Range;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Letter historically inserted between two vowels.
pub const GLIDE: &str = "j";

/// One phoneme of the query and the spellings that may stand for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Rule table key, or the literal character when no key matched.
    pub phoneme: String,
    pub variants: Vec<String>,
    /// Allow one-or-more repetitions (gemination).
    pub repeatable: bool,
    /// Character range of the phoneme in the normalized query.
    pub span: Range<usize>,
}

impl Group {
    fn write_regex(&self, out: &mut String, capture: bool) {
        if capture {
            out.push('(');
        }
        out.push_str("(?:");
        for (i, v) in self.variants.iter().enumerate() {
            if i > 0 {
                out.push('|');
            }
            out.push_str(&regex::escape(v));
        }
        out.push(')');
        if self.repeatable {
            out.push('+');
        }
        if capture {
            out.push(')');
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Group(Group),
    /// Optional intervocalic glide.
    Glide,
}

/// Compiled form of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    normalized: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Query after lowercasing and vowel folding.
    pub fn normalized_query(&self) -> &str {
        &self.normalized
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Phoneme groups in query order, glides skipped.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Group(g) => Some(g),
            Segment::Glide => None,
        })
    }

    /// An empty pattern matches every token.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn body(&self, capture: bool) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Group(g) => g.write_regex(&mut out, capture),
                Segment::Glide => {
                    out.push_str("(?:");
                    out.push_str(GLIDE);
                    out.push_str(")?");
                }
            }
        }
        out
    }

    /// Regex source for display. Unanchored, so it matches anywhere in a token.
    pub fn as_regex(&self) -> String {
        format!("(?i){}", self.body(false))
    }

    /// Build the executable regex.
    ///
    /// Capture group `n` holds the text matched by the `n`-th phoneme
    /// group. With `whole_word` the pattern is anchored at both ends; an
    /// empty pattern is never anchored.
    pub fn to_regex(&self, whole_word: bool) -> Result<Regex, regex::Error> {
        let body = self.body(true);
        let source = if whole_word && !self.is_empty() {
            format!("^(?:{body})$")
        } else {
            body
        };
        RegexBuilder::new(&source).case_insensitive(true).build()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_regex())
    }
}

/// Compile a query against the standard rule table.
pub fn compile(query: &str) -> Pattern {
    compile_with(query, &RULE_TABLE)
}

/// Compile a query against a given rule table.
pub fn compile_with(query: &str, table: &RuleTable) -> Pattern {
    // NFC so decomposed consonant diacritics still hit their table keys
    let normalized: String = normalize_vowels(&query.to_lowercase()).nfc().collect();
    let chars: Vec<char> = normalized.chars().collect();
    let mut segments = Vec::new();

    let mut pos = 0;
    while pos < chars.len() {
        let group = longest_phoneme(table, &chars, pos);
        pos = group.span.end;
        segments.push(Segment::Group(group));

        if pos < chars.len() && is_vowel(chars[pos - 1]) && is_vowel(chars[pos]) {
            segments.push(Segment::Glide);
        }
    }

    let pattern = Pattern {
        normalized,
        segments,
    };
    debug!(query, pattern = %pattern, "compiled query");
    pattern
}

/// Longest table key starting at `start`, or the bare character.
fn longest_phoneme(table: &RuleTable, chars: &[char], start: usize) -> Group {
    let longest = table.max_key_chars().min(chars.len() - start);
    for len in (1..=longest).rev() {
        let span = start..start + len;
        let chunk: String = chars[span.clone()].iter().collect();
        if let Some(variants) = table.get(&chunk) {
            return Group {
                repeatable: chunk.chars().all(char::is_alphabetic),
                phoneme: chunk,
                variants: variants.to_vec(),
                span,
            };
        }
    }

    let literal = chars[start].to_string();
    Group {
        repeatable: chars[start].is_alphabetic(),
        variants: vec![literal.clone()],
        phoneme: literal,
        span: start..start + 1,
    }
}
