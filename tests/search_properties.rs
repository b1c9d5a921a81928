use rust_grapheme_search::kwic::KwicLine;
use rust_grapheme_search::{
    RULE_TABLE, SearchOptions, TokenMatcher, compile, find_matches, normalize_vowels, search, tokenize,
};

#[test]
fn test_empty_query_matches_any_token() {
    let matcher = TokenMatcher::new(&compile(""), false).unwrap();
    for token in ["", "a", "ſzvet", "1848", "l’j"] {
        assert!(matcher.is_match(&normalize_vowels(token)), "{token:?}");
    }
}

#[test]
fn test_every_phoneme_matches_its_variants() {
    for phoneme in RULE_TABLE.phonemes() {
        let matcher = TokenMatcher::new(&compile(phoneme), true).unwrap();
        for variant in RULE_TABLE.get(phoneme).unwrap() {
            assert!(matcher.is_match(variant), "{phoneme} -> {variant}");
        }
    }
}

#[test]
fn test_digraph_takes_priority() {
    let pattern = compile("lj");
    let groups: Vec<_> = pattern.groups().collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].phoneme, "lj");
    assert_eq!(groups[0].variants, RULE_TABLE.get("lj").unwrap());
}

#[test]
fn test_whole_word_flag() {
    let corpus = "U predživot ulazi.";
    let sub = search("živ", corpus, &SearchOptions::default()).unwrap();
    assert_eq!(sub.matches.len(), 1);
    assert!(sub.matches[0].contains("[predživot]"));

    let whole = search("živ", corpus, &SearchOptions::default().whole_word(true)).unwrap();
    assert!(whole.matches.is_empty());
}

#[test]
fn test_kwic_at_corpus_edges() {
    let tokens = tokenize("prvi drugi treći četvrti");
    let first = KwicLine::new(0, &tokens, 2).unwrap();
    assert!(first.left.is_empty());
    assert_eq!(first.right, ["drugi", "treći"]);

    let last = KwicLine::new(3, &tokens, 2).unwrap();
    assert!(last.right.is_empty());
    assert_eq!(last.left, ["drugi", "treći"]);
}

#[test]
fn test_kljucz_end_to_end() {
    let result = search("ključ", "On reçe: kljucz je tvoj.", &SearchOptions::default()).unwrap();
    assert_eq!(result.matches.len(), 1);
    assert!(result.matches[0].contains("[kljucz]"));
    assert!(result.matches[0].len() > "[kljucz]".len());

    let pattern = compile("ključ");
    assert_eq!(pattern.groups().count(), 4);
    for group in pattern.groups() {
        let shown: Vec<String> = group.variants.iter().map(|v| regex::escape(v)).collect();
        assert!(result.pattern.contains(&shown.join("|")), "{}", group.phoneme);
    }
}

#[test]
fn test_matches_follow_corpus_order() {
    let tokens = tokenize("gnjev ljubav gliubav nebo l’ubav");
    let matcher = TokenMatcher::new(&compile("ljub"), false).unwrap();
    let hits = find_matches(&tokens, &matcher);
    let indices: Vec<usize> = hits.iter().map(|m| m.index).collect();
    assert_eq!(indices, [1, 2, 4]);
}
