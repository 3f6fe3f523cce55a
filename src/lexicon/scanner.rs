// Window scanner — greedy longest-match over a lexicon.
//
// Walks a text one code point at a time with a [left, right) window. While
// some word in the lexicon still starts with the window, the window grows and
// the longest exact word seen so far is held as the pending match. When the
// window can no longer grow, the pending match is committed and scanning
// resumes at the last code point of the dead window. Text between the end of
// a shorter pending match and that point is skipped. Committed matches never
// overlap.

use super::trie::Lexicon;

/// A committed match: code point offsets into the scanned text plus the
/// lexicon value of the matched word.
#[derive(Debug)]
pub struct Match<'a, V> {
    pub start: usize,
    pub end: usize,
    pub value: &'a V,
}

impl<V> Match<'_, V> {
    /// Length of the match in code points.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Scan `text` against every entry of `lexicon`, calling `on_match` for each
/// committed match in text order.
pub fn scan<'a, V, F>(lexicon: &'a Lexicon<V>, text: &[char], on_match: F)
where
    F: FnMut(Match<'a, V>),
{
    scan_filtered(lexicon, text, |_| true, on_match)
}

/// Like `scan`, but only entries for which `accept` returns true can become
/// a match. Rejected entries still let the window keep growing, so a longer
/// accepted word behind them is found.
pub fn scan_filtered<'a, V, A, F>(
    lexicon: &'a Lexicon<V>,
    text: &[char],
    accept: A,
    mut on_match: F,
) where
    A: Fn(&V) -> bool,
    F: FnMut(Match<'a, V>),
{
    let len = text.len();
    let mut left = 0;
    let mut right = 0;
    let mut pending: Option<Match<'a, V>> = None;

    while left < len {
        right += 1;

        if right > len {
            if let Some(m) = pending.take() {
                on_match(m);
            }
            break;
        }

        let window = &text[left..right];

        if !lexicon.has_prefix_chars(window) {
            // Dead window: nothing starts with it.
            left = right;

            // Resume at the last code point of the dead window.
            if let Some(m) = pending.take() {
                on_match(m);
                left -= 1;
                right -= 1;
            }
            continue;
        }

        if let Some(value) = lexicon.get_chars(window) {
            if accept(value) {
                pending = Some(Match {
                    start: left,
                    end: right,
                    value,
                });
            }
        }
    }
}

/// Collect every match of `text` as `(start, end, value)`.
pub fn find_all<'a, V>(lexicon: &'a Lexicon<V>, text: &str) -> Vec<Match<'a, V>> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    scan(lexicon, &chars, |m| out.push(m));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(words: &[&str]) -> Lexicon<String> {
        let mut lex = Lexicon::new();
        for w in words {
            lex.insert(w, w.to_string());
        }
        lex
    }

    fn matched(lex: &Lexicon<String>, text: &str) -> Vec<String> {
        find_all(lex, text).into_iter().map(|m| m.value.clone()).collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let lex = lexicon(&["ab", "abc"]);
        assert_eq!(matched(&lex, "abcx"), vec!["abc"]);
        assert_eq!(matched(&lex, "abx"), vec!["ab"]);
    }

    #[test]
    fn test_match_at_end_of_text() {
        let lex = lexicon(&["中国"]);
        let found = find_all(&lex, "我爱中国");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (2, 4));
    }

    #[test]
    fn test_resumes_at_end_of_dead_window() {
        // "ab" is pending when "abcx" dies; scanning picks up at "x", so the
        // "c" in between never starts a window.
        let lex = lexicon(&["ab", "abcd", "cx"]);
        assert_eq!(matched(&lex, "abcx"), vec!["ab"]);
    }

    #[test]
    fn test_gap_after_short_match_is_skipped() {
        let lex = lexicon(&["ab", "abcde", "cd", "ef"]);
        let found = find_all(&lex, "abcdxef");
        let spans: Vec<(usize, usize)> = found.iter().map(|m| (m.start, m.end)).collect();
        // "abcdx" dies at x; "cd" inside the gap is not matched
        assert_eq!(spans, vec![(0, 2), (5, 7)]);
    }

    #[test]
    fn test_dead_window_right_after_match_loses_nothing() {
        let lex = lexicon(&["ab", "bc"]);
        assert_eq!(matched(&lex, "abbc"), vec!["ab", "bc"]);
    }

    #[test]
    fn test_multibyte_offsets() {
        let lex = lexicon(&["人民", "民主"]);
        let found = find_all(&lex, "人民主");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "人民");
        assert_eq!(found[0].len(), 2);
    }

    #[test]
    fn test_filtered_entries_do_not_match() {
        let lex = lexicon(&["ab", "abc"]);
        let chars: Vec<char> = "abcab".chars().collect();
        let mut out = Vec::new();
        scan_filtered(&lex, &chars, |v| v != "abc", |m| out.push(m.value.clone()));
        assert_eq!(out, vec!["ab", "ab"]);
    }

    #[test]
    fn test_empty_text_and_lexicon() {
        let lex = lexicon(&[]);
        assert!(find_all(&lex, "anything").is_empty());
        let lex = lexicon(&["a"]);
        assert!(find_all(&lex, "").is_empty());
    }
}
