// N-gram builder — discovers multi-token phrases in a corpus.
//
// Each document is segmented into coarse tokens; every run of up to `n`
// consecutive tokens is a candidate span. Spans are counted per document,
// merged into a corpus-wide lexicon, and finally dumped with redundant
// prefixes pruned and a threshold policy applied.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, info};

use super::dict::{CancelToken, DictReader};
use super::meta::Meta;
use crate::error::{LexError, Result};
use crate::lexicon::{scan_filtered, Lexicon};
use crate::segment::{DictionarySegmenter, Segmenter};
use crate::tfidf::ScanResult;

/// Spans made only of digits, whitespace, punctuation and symbols are never
/// candidates.
static SYMBOLS_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[\d\s!@#$%^&*()、=_+\-\[\]{}\\|;:'",.<>/?，。！？：；“”‘’（）《》【】…—·～]+$"#)
        .expect("symbol pattern is valid")
});

pub const MIN_GRAM: usize = 2;
pub const MAX_GRAM: usize = 4;

/// Whether `span` consists only of digits, whitespace and punctuation.
pub fn is_symbolic(span: &str) -> bool {
    SYMBOLS_ONLY.is_match(span)
}

pub struct NGram<S> {
    segmenter: S,
    lexicon: Lexicon<Meta>,
    n: usize,
    /// Minimum per-document count for a body span to be merged
    threshold: u64,
    /// Documents sampled or loaded
    docs: u64,
    /// Sum of every merged frequency
    freq: u64,
}

impl NGram<DictionarySegmenter> {
    /// Build with a dictionary segmenter loaded from `base_dict`. Stop words,
    /// when given, are registered with the segmenter so they come out as
    /// whole tokens, and blocked in the lexicon.
    pub fn open(n: usize, base_dict: &Path, stop_words: Option<&Path>) -> Result<Self> {
        check_gram_size(n)?;

        let mut segmenter = DictionarySegmenter::load(base_dict)?;
        if let Some(path) = stop_words {
            segmenter.load_user_dictionary(path)?;
        }

        let mut g = Self::new(n, segmenter)?;
        if let Some(path) = stop_words {
            g.load_stop_words(path)?;
        }

        info!(n, base_dict = %base_dict.display(), "N-gram builder ready");
        Ok(g)
    }
}

impl<S: Segmenter> NGram<S> {
    /// A builder growing spans of up to `n` tokens (2 to 4).
    pub fn new(n: usize, segmenter: S) -> Result<Self> {
        check_gram_size(n)?;
        Ok(Self {
            segmenter,
            lexicon: Lexicon::new(),
            n,
            threshold: 1,
            docs: 0,
            freq: 0,
        })
    }

    /// Require body spans to occur at least `threshold` times in a document
    /// before they are merged.
    pub fn with_sample_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Block the built-in Chinese stop-word list.
    pub fn with_builtin_stop_words(mut self) -> Self {
        let words: Vec<String> = stop_words::get(stop_words::LANGUAGE::Chinese);
        for word in &words {
            self.block_word(word);
        }
        debug!(count = words.len(), "Blocked built-in stop words");
        self
    }

    /// Block every word of a one-word-per-line file. Returns how many lines
    /// were read.
    pub fn load_stop_words(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path).map_err(|source| LexError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;

        let mut count = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| LexError::Dictionary {
                path: path.to_path_buf(),
                source,
            })?;
            let word = line.trim();
            if !word.is_empty() {
                self.block_word(word);
                count += 1;
            }
        }

        debug!(path = %path.display(), count, "Loaded stop words");
        Ok(count)
    }

    /// Mark a word as a stop word.
    pub fn block_word(&mut self, word: &str) {
        match self.lexicon.get_mut(word) {
            Some(meta) => meta.blocked = true,
            None => {
                self.lexicon.insert(word, Meta::stop_word(word));
            }
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Documents sampled or loaded so far.
    pub fn docs(&self) -> u64 {
        self.docs
    }

    /// Sum of all merged frequencies.
    pub fn freq(&self) -> u64 {
        self.freq
    }

    /// Number of lexicon entries, stop words included.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&Meta> {
        self.lexicon.get(word)
    }

    pub fn lexicon(&self) -> &Lexicon<Meta> {
        &self.lexicon
    }

    fn is_blocked(&self, word: &str) -> bool {
        self.lexicon.get(word).is_some_and(|m| m.blocked)
    }

    /// Candidate spans of one document, with per-document counts. A span
    /// never starts or ends with whitespace, so it reads back from a dumped
    /// dictionary unchanged.
    pub fn spans(&self, text: &str) -> HashMap<String, Meta> {
        let tokens = self.segmenter.cut(text);
        let mut found: HashMap<String, Meta> = HashMap::new();

        for i in 0..tokens.len() {
            let window = &tokens[i..(i + self.n).min(tokens.len())];
            let mut span = String::new();

            for (k, token) in window.iter().enumerate() {
                if self.is_blocked(token) {
                    break;
                }

                span.push_str(token);
                if is_symbolic(&span) || span.trim() != span {
                    continue;
                }

                let breakdown = &window[..=k];
                match found.get_mut(&span) {
                    Some(meta) => {
                        meta.freq += 1;
                        meta.keep_shorter_token(breakdown, breakdown.len());
                    }
                    None => {
                        found.insert(span.clone(), Meta::span(span.as_str(), breakdown.to_vec()));
                    }
                }
            }
        }

        found
    }

    /// Learn from one document.
    ///
    /// Body spans reaching the sample threshold are merged. Title spans are
    /// merged when they are multi-token phrases that the body also contains,
    /// whatever their count. Each merged span counts the document once.
    pub fn sample(&mut self, title: &str, content: &str) {
        let mut title_spans = self.spans(title);
        let content_spans = self.spans(content);
        let mut merged: HashSet<String> = HashSet::new();

        for (span, meta) in &content_spans {
            if meta.freq < self.threshold {
                continue;
            }
            let mut meta = meta.clone();
            meta.docs = if merged.contains(span) { 0 } else { 1 };
            self.merge(meta);
            merged.insert(span.clone());
            title_spans.remove(span);
        }

        for (span, mut meta) in title_spans {
            if !content_spans.contains_key(&span) || meta.token_count() <= 1 {
                continue;
            }
            meta.docs = if merged.contains(&span) { 0 } else { 1 };
            self.merge(meta);
            merged.insert(span);
        }

        self.docs += 1;
    }

    /// Fold one observation into the corpus lexicon.
    pub fn merge(&mut self, meta: Meta) {
        self.freq += meta.freq;
        match self.lexicon.get_mut(&meta.word) {
            Some(existing) => existing.merge(&meta),
            None => {
                let word = meta.word.clone();
                self.lexicon.insert(&word, meta);
            }
        }
    }

    /// Merge an n-gram dictionary file into the corpus. Returns the number of
    /// records merged.
    pub fn load_dict(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.load_dict_cancellable(path, &CancelToken::new())
    }

    /// `load_dict`, stopping early once `cancel` fires. Records merged before
    /// that stay merged.
    pub fn load_dict_cancellable(&mut self, path: impl AsRef<Path>, cancel: &CancelToken) -> Result<usize> {
        let path = path.as_ref();
        let reader = DictReader::open(path, cancel.clone())?;
        self.docs += reader.total_docs();

        let mut merged = 0;
        for meta in reader {
            self.merge(meta);
            merged += 1;
        }

        info!(path = %path.display(), records = merged, docs = self.docs, "Loaded n-gram dictionary");
        Ok(merged)
    }

    /// Whether `meta` never occurs apart from a longer entry that starts
    /// with it: some longer entry has exactly its docs and freq, or the
    /// longer entries' frequencies add up to exactly its freq.
    fn is_redundant(&self, word: &str, meta: &Meta) -> bool {
        let mut tail_freq = 0;
        for (tail, other) in self.lexicon.prefixed(word) {
            if tail == word {
                continue;
            }
            if other.docs == meta.docs && other.freq == meta.freq {
                return true;
            }
            tail_freq += other.freq;
        }
        tail_freq == meta.freq
    }

    /// Write the dictionary to `path`. Returns the number of entries written.
    pub fn dump<F>(&self, path: impl AsRef<Path>, threshold: F) -> Result<usize>
    where
        F: Fn(u64, u64, &Meta) -> bool,
    {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        let written = self.dump_to(&mut out, threshold)?;
        out.flush()?;

        info!(path = %path.display(), entries = written, docs = self.docs, "Dumped n-gram dictionary");
        Ok(written)
    }

    /// Write the dictionary: the document count, then one
    /// `word\tfreq\tdocs\ttokenCount` line per entry that is not a stop
    /// word, has at least two characters, is not a redundant prefix, and
    /// passes `threshold`.
    pub fn dump_to<W, F>(&self, mut out: W, threshold: F) -> Result<usize>
    where
        W: Write,
        F: Fn(u64, u64, &Meta) -> bool,
    {
        writeln!(out, "{}", self.docs)?;

        let mut written = 0;
        for (word, meta) in self.lexicon.iter() {
            if meta.blocked || word.chars().count() < 2 {
                continue;
            }
            if self.is_redundant(&word, meta) {
                continue;
            }
            if !threshold(self.docs, self.freq, meta) {
                continue;
            }
            writeln!(out, "{}\t{}\t{}\t{}", word, meta.freq, meta.docs, meta.token_count())?;
            written += 1;
        }

        Ok(written)
    }

    /// Find known phrases in a document with the window scanner and score
    /// them by TF-IDF against the corpus. Stop words are skipped.
    pub fn scan(&self, text: &str) -> ScanResult {
        let chars: Vec<char> = text.chars().collect();
        let mut result = ScanResult::new();
        scan_filtered(
            &self.lexicon,
            &chars,
            |meta| !meta.blocked,
            |m| result.add(&m.value.word, m.value.docs),
        );
        result
    }

    /// Score a document's own candidate spans by TF-IDF, using the corpus
    /// document frequency of each span (0 for spans the corpus never saw).
    pub fn match_text(&self, text: &str) -> ScanResult {
        let mut spans: Vec<Meta> = self.spans(text).into_values().collect();
        spans.sort_by(|a, b| a.word.cmp(&b.word));

        let mut result = ScanResult::new();
        for meta in spans {
            let docs = self.lexicon.get(&meta.word).map_or(0, |m| m.docs);
            result.add_count(&meta.word, meta.freq, docs);
        }
        result
    }
}

fn check_gram_size(n: usize) -> Result<()> {
    if !(MIN_GRAM..=MAX_GRAM).contains(&n) {
        return Err(LexError::InvalidGramSize(n));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(n: usize, words: &[&str]) -> NGram<DictionarySegmenter> {
        let mut seg = DictionarySegmenter::new();
        for w in words {
            seg.add_word(w);
        }
        NGram::new(n, seg).unwrap()
    }

    #[test]
    fn test_gram_size_bounds() {
        for n in [0, 1, 5, 10] {
            let err = NGram::new(n, DictionarySegmenter::new()).err().unwrap();
            assert!(matches!(err, LexError::InvalidGramSize(v) if v == n));
        }
        for n in 2..=4 {
            assert!(NGram::new(n, DictionarySegmenter::new()).is_ok());
        }
    }

    #[test]
    fn test_symbolic_spans() {
        assert!(is_symbolic("2024"));
        assert!(is_symbolic("3.14%"));
        assert!(is_symbolic("，。"));
        assert!(is_symbolic("12 34"));
        assert!(!is_symbolic("2024年"));
        assert!(!is_symbolic("abc"));
    }

    #[test]
    fn test_spans_grow_up_to_n_tokens() {
        let g = builder(2, &["机器", "学习"]);
        let spans = g.spans("机器学习");
        let mut words: Vec<&str> = spans.keys().map(String::as_str).collect();
        words.sort();
        assert_eq!(words, vec!["学习", "机器", "机器学习"]);
        assert_eq!(spans["机器学习"].token_count(), 2);
    }

    #[test]
    fn test_spans_break_on_stop_word() {
        let mut g = builder(3, &["机器", "学习"]);
        g.block_word("的");
        let spans = g.spans("机器的学习");
        assert!(spans.contains_key("机器"));
        assert!(spans.contains_key("学习"));
        assert!(!spans.keys().any(|s| s.contains('的')));
    }

    #[test]
    fn test_spans_skip_symbols_but_keep_growing() {
        let g = builder(2, &["年"]);
        let spans = g.spans("2024年");
        assert!(!spans.contains_key("2024"));
        assert!(spans.contains_key("2024年"));
    }

    #[test]
    fn test_spans_never_start_or_end_with_whitespace() {
        let g = builder(3, &["机器", "学习"]);
        let spans = g.spans("机器 学习");
        let mut words: Vec<&str> = spans.keys().map(String::as_str).collect();
        words.sort();
        assert_eq!(words, vec!["学习", "机器", "机器 学习"]);
        assert_eq!(spans["机器 学习"].token_count(), 3);
    }

    #[test]
    fn test_merge_accumulates() {
        let mut g = builder(2, &[]);
        let meta = Meta::record("深度学习", 3, 1, 2);
        g.merge(meta.clone());
        g.merge(meta);
        let m = g.get("深度学习").unwrap();
        assert_eq!((m.freq, m.docs), (6, 2));
        assert_eq!(g.freq(), 6);
    }

    #[test]
    fn test_sample_counts_document_once() {
        let mut g = builder(2, &["机器", "学习"]);
        g.sample("", "机器学习机器学习");
        let m = g.get("机器学习").unwrap();
        assert_eq!((m.freq, m.docs), (2, 1));
        assert_eq!(g.docs(), 1);

        g.sample("", "");
        assert_eq!(g.docs(), 2);
    }

    #[test]
    fn test_title_phrase_needs_body_and_multiple_tokens() {
        let mut g = builder(2, &["机器", "学习", "模型"]).with_sample_threshold(5);
        g.sample("机器学习模型", "机器学习");

        // body count 1 < 5, but the title phrase also appears in the body
        let m = g.get("机器学习").unwrap();
        assert_eq!((m.freq, m.docs), (1, 1));
        // single-token title spans do not qualify
        assert!(g.get("机器").is_none());
        // title-only phrase
        assert!(g.get("学习模型").is_none());
    }

    #[test]
    fn test_dump_prunes_redundant_prefix() {
        let mut g = builder(2, &[]);
        g.merge(Meta::record("ab", 10, 5, 1));
        g.merge(Meta::record("abc", 10, 5, 2));
        g.merge(Meta::record("xy", 7, 3, 1));
        g.merge(Meta::record("xyz", 3, 2, 2));
        g.merge(Meta::record("xyw", 4, 1, 2));

        let mut out = Vec::new();
        let written = g.dump_to(&mut out, |_, _, _| true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 3);
        assert_eq!(text, "0\nabc\t10\t5\t2\nxyw\t4\t1\t2\nxyz\t3\t2\t2\n");
    }

    #[test]
    fn test_dump_skips_blocked_and_single_chars() {
        let mut g = builder(2, &[]);
        g.block_word("因为");
        g.merge(Meta::record("因为", 9, 9, 1));
        g.merge(Meta::record("a", 9, 9, 1));
        g.merge(Meta::record("模型", 9, 9, 1));

        let mut out = Vec::new();
        g.dump_to(&mut out, |_, _, _| true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n模型\t9\t9\t1\n");
    }

    #[test]
    fn test_scan_ignores_blocked_entries() {
        let mut g = builder(2, &[]);
        g.merge(Meta::record("ab", 2, 2, 1));
        g.merge(Meta::record("abc", 2, 1, 2));
        g.block_word("abc");

        let r = g.scan("abcxab");
        assert_eq!(r.count("ab"), 2);
        assert_eq!(r.count("abc"), 0);
    }
}
