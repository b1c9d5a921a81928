//! Token matching and contextual post-filters.
//!
//! Matching runs the compiled pattern over each token's normalized form.
//! The post-filters are a separate pass over the hits: they look at which
//! spelling each phoneme group actually matched, which the flat rule
//! table cannot express.

use crate::config::SearchOptions;
use crate::error::Result;
use crate::normalize::{is_pure_consonant, is_vowel, normalize_vowels};
use crate::pattern::Pattern;
use crate::tokenize::Token;
use regex::{Captures, Regex};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// Pure-consonant tokens this long with no `r` are treated as OCR noise.
const NOISE_CONSONANT_RUN: usize = 5;

/// A token that satisfied the pattern, with its position in the token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult<'t> {
    pub index: usize,
    pub token: Token<'t>,
}

/// Per-group context needed by the post-filters.
#[derive(Debug, Clone)]
struct GroupContext {
    phoneme: String,
    /// Neither neighbour in the query is a vowel.
    between_consonants: bool,
}

/// Executable form of a [`Pattern`].
#[derive(Debug, Clone)]
pub struct TokenMatcher {
    regex: Regex,
    groups: Vec<GroupContext>,
}

impl TokenMatcher {
    pub fn new(pattern: &Pattern, whole_word: bool) -> Result<Self> {
        let regex = pattern.to_regex(whole_word)?;
        let chars: Vec<char> = pattern.normalized_query().chars().collect();
        let groups = pattern
            .groups()
            .map(|g| {
                let before = g.span.start.checked_sub(1).and_then(|i| chars.get(i));
                let after = chars.get(g.span.end);
                GroupContext {
                    phoneme: g.phoneme.clone(),
                    between_consonants: !before.is_some_and(|&c| is_vowel(c))
                        && !after.is_some_and(|&c| is_vowel(c)),
                }
            })
            .collect();
        Ok(Self { regex, groups })
    }

    /// Test an already normalized token.
    pub fn is_match(&self, normalized: &str) -> bool {
        self.regex.is_match(normalized)
    }

    /// True if some match occurrence in `normalized` passes `check`.
    ///
    /// Every start position is tried, so a rejected leftmost match does not
    /// hide a valid one further right.
    fn any_occurrence(&self, normalized: &str, check: impl Fn(&Captures<'_>) -> bool) -> bool {
        let mut from = 0;
        while from <= normalized.len() {
            let Some(caps) = self.regex.captures_at(normalized, from) else {
                return false;
            };
            if check(&caps) {
                return true;
            }
            let start = caps.get(0).map_or(normalized.len(), |m| m.start());
            from = match normalized[start..].chars().next() {
                Some(c) => start + c.len_utf8(),
                None => return false,
            };
        }
        false
    }

    /// The `ar` spelling of `r` is only valid for syllabic r.
    fn syllabic_r_ok(&self, caps: &Captures<'_>) -> bool {
        self.groups.iter().enumerate().all(|(i, g)| {
            if g.phoneme != "r" || g.between_consonants {
                return true;
            }
            caps.get(i + 1).is_none_or(|m| !m.as_str().contains('a'))
        })
    }
}

/// Lowercase and vowel-fold a surface token for matching.
///
/// The result is NFC so a combining cedilla or caron left on a consonant
/// compares equal to the precomposed spelling in the rule table.
pub fn normalize_token(surface: &str) -> String {
    normalize_vowels(&surface.to_lowercase()).nfc().collect()
}

/// Select the tokens matching `matcher`, in corpus order.
pub fn find_matches<'t>(tokens: &[Token<'t>], matcher: &TokenMatcher) -> Vec<MatchResult<'t>> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matcher.is_match(&normalize_token(t.text)))
        .map(|(index, &token)| MatchResult { index, token })
        .collect()
}

/// Tokenisation leftovers: no letters at all, or a long consonant run
/// that cannot carry a syllable.
pub fn is_noise(surface: &str) -> bool {
    if !surface.chars().any(char::is_alphabetic) {
        return true;
    }
    let folded = normalize_token(surface);
    is_pure_consonant(&folded)
        && folded.chars().count() >= NOISE_CONSONANT_RUN
        && !folded.contains('r')
}

/// Every `q` in the matched region must be followed by `u` or `v`.
fn qu_ok(normalized: &str, caps: &Captures<'_>) -> bool {
    let Some(m) = caps.get(0) else {
        return true;
    };
    normalized[m.range()]
        .char_indices()
        .filter(|&(_, c)| c == 'q')
        .all(|(i, _)| {
            let next = normalized[m.start() + i + 1..].chars().next();
            matches!(next, Some('u' | 'v'))
        })
}

/// Drop hits rejected by the filters enabled in `options`.
pub fn apply_post_filters<'t>(
    matches: Vec<MatchResult<'t>>,
    matcher: &TokenMatcher,
    options: &SearchOptions,
) -> Vec<MatchResult<'t>> {
    if !options.enable_post_filters && !options.enable_qu_rule {
        return matches;
    }
    matches
        .into_iter()
        .filter(|hit| {
            if options.enable_post_filters && is_noise(hit.token.text) {
                return false;
            }
            let normalized = normalize_token(hit.token.text);
            matcher.any_occurrence(&normalized, |caps| {
                (!options.enable_post_filters || matcher.syllabic_r_ok(caps))
                    && (!options.enable_qu_rule || qu_ok(&normalized, caps))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;
    use crate::tokenize::tokenize;

    fn surfaces<'t>(hits: &[MatchResult<'t>]) -> Vec<&'t str> {
        hits.iter().map(|m| m.token.text).collect()
    }

    fn run<'t>(query: &str, tokens: &[Token<'t>], options: SearchOptions) -> Vec<&'t str> {
        let matcher = TokenMatcher::new(&compile(query), options.whole_word_only).unwrap();
        let hits = find_matches(tokens, &matcher);
        surfaces(&apply_post_filters(hits, &matcher, &options))
    }

    #[test]
    fn test_substring_and_whole_word() {
        let tokens = tokenize("predživot živ živi");
        let opts = SearchOptions::default();
        assert_eq!(run("živ", &tokens, opts), ["predživot", "živ", "živi"]);
        assert_eq!(run("živ", &tokens, opts.whole_word(true)), ["živ"]);
    }

    #[test]
    fn test_results_keep_corpus_order_and_index() {
        let tokens = tokenize("kuća i chiuchia, tjesna kuća");
        let matcher = TokenMatcher::new(&compile("ć"), false).unwrap();
        let hits = find_matches(&tokens, &matcher);
        let indices: Vec<usize> = hits.iter().map(|m| m.index).collect();
        assert_eq!(indices, [2, 3]);
        assert_eq!(surfaces(&hits), ["chiuchia", "tjesna"]);
    }

    #[test]
    fn test_token_vowel_accents_ignored() {
        let tokens = tokenize("KÚĆA kuća");
        assert_eq!(run("kuca", &tokens, SearchOptions::default()), Vec::<&str>::new());
        assert_eq!(run("ku", &tokens, SearchOptions::default()), ["KÚĆA", "kuća"]);
    }

    #[test]
    fn test_noise() {
        assert!(is_noise("1848"));
        assert!(is_noise("’+"));
        assert!(is_noise("_"));
        assert!(is_noise("bcdfg"));
        assert!(!is_noise("prst"));
        assert!(!is_noise("sczhtvrd"));
        assert!(!is_noise("s"));
        assert!(!is_noise("ſzvet"));
    }

    #[test]
    fn test_accented_vowels_are_not_noise() {
        assert!(!is_noise("ſzvét"));
        assert!(!is_noise("ſzve\u{0301}t"));
        assert!(!is_noise("ŠTRĆÁK"));

        let tokens = tokenize("Ovo ſzvét je");
        let opts = SearchOptions::default();
        assert_eq!(run("zvet", &tokens, opts), ["ſzvét"]);
        assert_eq!(run("zvet", &tokens, opts.post_filters(true)), ["ſzvét"]);
    }

    #[test]
    fn test_decomposed_consonant_in_corpus() {
        // c + combining cedilla is the same letter as the table's ç
        let tokens = tokenize("rec\u{0327}e reçe rece");
        let opts = SearchOptions::default();
        assert_eq!(run("reče", &tokens, opts), ["rec\u{0327}e", "reçe"]);
        assert_eq!(normalize_token("Rec\u{0327}E"), "reçe");
    }

    #[test]
    fn test_noise_filter_drops_artifacts() {
        let tokens = tokenize("l+j l+judi");
        let opts = SearchOptions::default();
        assert_eq!(run("lj", &tokens, opts), ["l+j", "l+judi"]);
        // "l+j" alone still has letters, so it survives
        assert_eq!(run("lj", &tokens, opts.post_filters(true)), ["l+j", "l+judi"]);

        let tokens = tokenize("12 x12");
        assert_eq!(run("1", &tokens, opts), ["12", "x12"]);
        assert_eq!(run("1", &tokens, opts.post_filters(true)), ["x12"]);
    }

    #[test]
    fn test_syllabic_r() {
        // r between consonants: <ar> allowed
        let tokens = tokenize("parſt prſt");
        let opts = SearchOptions::default().post_filters(true);
        assert_eq!(run("prst", &tokens, opts), ["parſt", "prſt"]);

        // r before a vowel: <ar> only without the filter
        let tokens = tokenize("karaj kraj");
        assert_eq!(run("kraj", &tokens, SearchOptions::default()), ["karaj", "kraj"]);
        assert_eq!(run("kraj", &tokens, opts), ["kraj"]);
    }

    #[test]
    fn test_syllabic_r_tries_later_occurrences() {
        // leftmost match uses <ar>, a later one uses plain r
        let tokens = tokenize("arara");
        let opts = SearchOptions::default().post_filters(true);
        assert_eq!(run("ra", &tokens, opts), ["arara"]);
    }

    #[test]
    fn test_qu_rule() {
        let tokens = tokenize("qanat quam");
        let opts = SearchOptions::default();
        assert_eq!(run("qa", &tokens, opts), ["qanat"]);
        assert_eq!(run("qa", &tokens, opts.qu_rule(true)), Vec::<&str>::new());
        assert_eq!(run("kam", &tokens, opts.qu_rule(true)), ["quam"]);
    }

    #[test]
    fn test_qu_rule_looks_past_match_end() {
        // query "q" matches only the q; the u after it lies outside the match
        let tokens = tokenize("quod qoz");
        let opts = SearchOptions::default().qu_rule(true);
        assert_eq!(run("q", &tokens, opts), ["quod"]);
    }
}
