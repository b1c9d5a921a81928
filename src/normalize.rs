//! Diacritic folding for queries and corpus tokens.
//!
//! Only vowels lose their accents. Consonant diacritics (č, ć, š, ž, đ)
//! carry phonemic information and key the rule table, so they are kept.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// True for the five vowel letters, either case, without diacritics.
pub fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Base vowel of `c` if `c` is a vowel with or without diacritics.
fn vowel_base(c: char) -> Option<char> {
    let mut base = None;
    decompose_canonical(c, |d| {
        if base.is_none() {
            base = Some(d);
        }
    });
    base.filter(|&b| is_vowel(b))
}

/// Strip diacritics from vowels, leaving every other character untouched.
///
/// Works on both precomposed (`á`) and combining (`a\u{0301}`) forms: the
/// marks trailing a vowel are dropped, marks trailing a consonant stay.
pub fn normalize_vowels(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_vowel = false;

    for c in text.chars() {
        if is_combining_mark(c) {
            if !after_vowel {
                out.push(c);
            }
            continue;
        }
        match vowel_base(c) {
            Some(base) => {
                out.push(base);
                after_vowel = true;
            }
            None => {
                out.push(c);
                after_vowel = false;
            }
        }
    }
    out
}

/// Remove all diacritics, consonants included.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Alphabetic token with no vowel letter in it.
pub fn is_pure_consonant(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphabetic() && !is_vowel(c))
}
