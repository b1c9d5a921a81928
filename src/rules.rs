//! Graphematic rule table.
//!
//! Maps each phoneme of the modern standard orthography (a letter or a
//! digraph) to the spellings attested for it in the historical corpus.
//! The standard table follows the Kajkavian-era print conventions the
//! corpus was digitised from: Hungarian-style `cz`, Italian-style `gli`
//! and `gn` for the palatals, long s (`ſ`) for the sibilants.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Process-wide standard table, built on first use and never mutated.
    pub static ref RULE_TABLE: RuleTable = RuleTable::new(STANDARD_RULES);
}

/// Phoneme -> variants, in display order.
///
/// Two entries go beyond the attested print spellings: `lj` also lists its
/// modern form, giving it seven variants, and `č` lists `cz` instead of its
/// own literal, so `ključ` finds `kljucz`. Lists are never empty, but a
/// phoneme's own literal is not required (`c` is only ever `cz`).
pub const STANDARD_RULES: &[(&str, &[&str])] = &[
    ("a", &["a"]),
    ("b", &["b"]),
    // /c/ is only ever written <cz>
    ("c", &["cz"]),
    ("č", &["ç", "cz"]),
    // <chi> is the primary spelling of /ć/
    ("ć", &["chi", "ch", "tj"]),
    ("d", &["d"]),
    ("đ", &["gi", "g", "gj", "dj", "dg"]),
    ("e", &["e"]),
    ("f", &["f"]),
    ("g", &["g", "gh"]),
    ("h", &["h"]),
    ("i", &["i"]),
    ("j", &["j"]),
    // qu = kv
    ("k", &["k", "qu"]),
    ("l", &["l"]),
    ("lj", &["gli", "gl", "l’j", "l’", "l+j", "li", "lj"]),
    ("m", &["m"]),
    ("n", &["n"]),
    ("nj", &["gni", "gn", "nj", "n’j", "n’", "n+j"]),
    ("o", &["o"]),
    ("p", &["p", "ph"]),
    // <ar> only for syllabic /r/; enforced by the matcher post-filters
    ("r", &["r", "ar"]),
    ("s", &["ſ", "s"]),
    ("š", &["ſc", "sc"]),
    ("t", &["t"]),
    ("u", &["u"]),
    ("v", &["v", "u"]),
    ("z", &["z"]),
    // precomposed and combining caron both occur in the transcriptions
    ("ž", &["ž", "z\u{030C}", "ſz", "ſſ", "zs", "zh", "x"]),
];

/// Immutable phoneme lookup table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    entries: HashMap<String, Vec<String>>,
    max_key_chars: usize,
}

impl RuleTable {
    /// Build a table from `(phoneme, variants)` pairs.
    ///
    /// A phoneme listed with no variants maps to its own literal form, so
    /// every lookup yields at least one variant. Later duplicates of a
    /// phoneme replace earlier ones.
    pub fn new(rules: &[(&str, &[&str])]) -> Self {
        let mut entries = HashMap::with_capacity(rules.len());
        for (phoneme, variants) in rules {
            let mut list: Vec<String> = Vec::with_capacity(variants.len());
            for v in variants.iter() {
                if !v.is_empty() && !list.iter().any(|seen| seen.as_str() == *v) {
                    list.push(v.to_string());
                }
            }
            if list.is_empty() {
                list.push(phoneme.to_string());
            }
            entries.insert(phoneme.to_string(), list);
        }
        let max_key_chars = entries.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        Self {
            entries,
            max_key_chars,
        }
    }

    /// Variants for a phoneme, if it has an entry.
    pub fn get(&self, phoneme: &str) -> Option<&[String]> {
        self.entries.get(phoneme).map(Vec::as_slice)
    }

    /// Length in characters of the longest phoneme key.
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    pub fn phonemes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
