// Unit tests for the lexicon trie and the greedy window scanner.
//
// Covers the worked scanning example, code point addressing on multi-byte
// text, and the non-overlap property over random lexicons and inputs.

use lexgram::lexicon::{find_all, scan, Lexicon};
use proptest::prelude::*;

fn lexicon(words: &[&str]) -> Lexicon<String> {
    let mut lex = Lexicon::new();
    for w in words {
        lex.insert(w, w.to_string());
    }
    lex
}

// ============================================================
// Worked example
// ============================================================

#[test]
fn greedy_scan_of_repeated_phrases() {
    let lex = lexicon(&["ab", "abc"]);
    let text = "abcabcab0acabcabc";
    assert_eq!(text.chars().count(), 17);

    let found = find_all(&lex, text);
    let spans: Vec<(usize, usize, &str)> = found
        .iter()
        .map(|m| (m.start, m.end, m.value.as_str()))
        .collect();

    // "abc" at 0, 3, 11 and 14; the lone "ab" sits right before the "0".
    assert_eq!(
        spans,
        vec![
            (0, 3, "abc"),
            (3, 6, "abc"),
            (6, 8, "ab"),
            (11, 14, "abc"),
            (14, 17, "abc"),
        ]
    );
    assert_eq!(found.iter().filter(|m| m.value == "ab").count(), 1);
}

#[test]
fn dead_window_skips_to_its_end() {
    // "a" opens a window that dies at "aa"; scanning restarts after it, so
    // the second "a" never starts a match.
    let lex = lexicon(&["abc"]);
    assert!(find_all(&lex, "aabc").is_empty());
    assert_eq!(find_all(&lex, "xabc").len(), 1);
}

// ============================================================
// Unicode
// ============================================================

#[test]
fn chinese_text_is_scanned_by_code_point() {
    let lex = lexicon(&["人工智能", "人工", "智能", "模型"]);
    let text = "人工智能大模型，人工与智能";
    let found = find_all(&lex, text);
    let words: Vec<&str> = found.iter().map(|m| m.value.as_str()).collect();
    assert_eq!(words, vec!["人工智能", "模型", "人工", "智能"]);

    let chars: Vec<char> = text.chars().collect();
    for m in &found {
        let slice: String = chars[m.start..m.end].iter().collect();
        assert_eq!(&slice, m.value);
    }
}

#[test]
fn prefix_queries_on_multibyte_keys() {
    let lex = lexicon(&["北京", "北京大学", "北方"]);
    assert!(lex.has_prefix("北"));
    assert!(lex.has_prefix("北京大"));
    assert!(!lex.has_prefix("京"));
    assert_eq!(lex.keys_with_prefix("北京"), vec!["北京", "北京大学"]);
    assert_eq!(lex.keys_with_prefix("北").len(), 3);
}

#[test]
fn removed_words_stop_matching() {
    let mut lex = lexicon(&["ab", "abc"]);
    lex.remove("abc");
    let found = find_all(&lex, "abcab");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|m| m.value == "ab"));
}

// ============================================================
// Properties
// ============================================================

proptest! {
    #[test]
    fn matches_never_overlap(
        words in prop::collection::vec("[abc]{1,4}", 0..8),
        text in "[abc0]{0,40}",
    ) {
        let mut lex = Lexicon::new();
        for w in &words {
            lex.insert(w, w.clone());
        }
        let chars: Vec<char> = text.chars().collect();

        let mut spans = Vec::new();
        scan(&lex, &chars, |m| spans.push((m.start, m.end, m.value.clone())));

        let mut last_end = 0;
        for (start, end, word) in &spans {
            prop_assert!(*start >= last_end);
            prop_assert!(start < end);
            let slice: String = chars[*start..*end].iter().collect();
            prop_assert_eq!(&slice, word);
            last_end = *end;
        }
    }
}
