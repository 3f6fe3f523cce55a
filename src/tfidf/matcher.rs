// TF-IDF keyword matcher over a fixed vocabulary.
//
// The vocabulary lives in a lexicon; documents are scanned with the greedy
// window scanner, so only known words are ever counted. Adding samples
// builds document frequencies, matching scores a document against them.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::info;

use super::scan::ScanResult;
use super::word::{self, get_idf, get_tf, Word};
use crate::error::{LexError, Result};
use crate::lexicon::{scan, Lexicon};
use crate::output::excerpt;

/// Per-word corpus statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermMeta {
    pub word: String,
    /// Number of sampled documents containing the word
    pub docs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    /// Total sampled documents
    pub(super) docs: u64,
    pub(super) lexicon: Lexicon<TermMeta>,
    debug: bool,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matcher from one-word-per-line vocabulary lists.
    pub fn from_word_lists<R, I>(lists: I) -> io::Result<Self>
    where
        R: BufRead,
        I: IntoIterator<Item = R>,
    {
        let mut m = Self::new();
        for list in lists {
            m.read_words(list)?;
        }
        Ok(m)
    }

    /// Log the TF/IDF breakdown of every scored word.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Add every non-blank, trimmed line of `reader` as a word. Returns the
    /// number of lines added.
    pub fn read_words<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                self.add_word(word);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Load a vocabulary list file.
    pub fn load_words(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_words(BufReader::new(file))
            .map_err(|source| LexError::Dictionary {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Add a word, resetting its statistics if it was already known.
    pub fn add_word(&mut self, word: &str) {
        self.lexicon.insert(
            word,
            TermMeta {
                word: word.to_string(),
                docs: 0,
            },
        );
    }

    /// Forget a word. Returns whether it was known.
    pub fn remove_word(&mut self, word: &str) -> bool {
        self.lexicon.remove(word).is_some()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Total sampled documents.
    pub fn docs(&self) -> u64 {
        self.docs
    }

    /// Document frequency of a known word.
    pub fn word_docs(&self, word: &str) -> Option<u64> {
        self.lexicon.get(word).map(|m| m.docs)
    }

    /// Pre-order iterator over the vocabulary and its statistics.
    pub fn terms(&self) -> impl Iterator<Item = &TermMeta> {
        self.lexicon.iter().map(|(_, meta)| meta)
    }

    /// Count a document: each distinct known word in it gains one document,
    /// and the corpus grows by one document either way.
    pub fn add_sample(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let mut seen: HashSet<String> = HashSet::new();
        scan(&self.lexicon, &chars, |m| {
            seen.insert(m.value.word.clone());
        });

        for word in &seen {
            if let Some(meta) = self.lexicon.get_mut(word) {
                meta.docs += 1;
            }
        }
        self.docs += 1;
    }

    /// Count every occurrence of every known word in `text`.
    pub fn scan(&self, text: &str) -> ScanResult {
        let chars: Vec<char> = text.chars().collect();
        let mut result = ScanResult::new();
        scan(&self.lexicon, &chars, |m| result.add(&m.value.word, m.value.docs));
        result
    }

    /// Score the known words of a document. Unsorted.
    pub fn match_text(&self, text: &str) -> Vec<Word> {
        let result = self.scan(text);

        if self.debug {
            info!(document = %excerpt(text, 25), keywords = result.total(), "Matching document");
        }

        result
            .tallies()
            .iter()
            .map(|t| {
                let w = Word::scored(t.word.as_str(), t.count, result.total(), t.docs, self.docs);
                if self.debug {
                    info!(
                        word = %t.word,
                        tf = get_tf(t.count as f64, result.total() as f64),
                        idf = get_idf(t.docs as f64, self.docs as f64),
                        count = t.count,
                        docs = t.docs,
                        total_docs = self.docs,
                        score = w.score,
                        "TF-IDF"
                    );
                }
                w
            })
            .collect()
    }

    /// The `n` highest scoring words of a document; `None` returns all of
    /// them, sorted.
    pub fn top_n(&self, n: Option<usize>, text: &str) -> Vec<Word> {
        word::top_n(self.match_text(text), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sample_counts_documents_not_occurrences() {
        let mut m = Matcher::new();
        m.add_word("模型");
        m.add_word("数据");

        m.add_sample("模型模型模型数据");
        m.add_sample("模型");
        m.add_sample("没有关键词");

        assert_eq!(m.docs(), 3);
        assert_eq!(m.word_docs("模型"), Some(2));
        assert_eq!(m.word_docs("数据"), Some(1));
    }

    #[test]
    fn test_add_word_overwrites() {
        let mut m = Matcher::new();
        m.add_word("模型");
        m.add_sample("模型");
        m.add_word("模型");
        assert_eq!(m.word_docs("模型"), Some(0));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_remove_word() {
        let mut m = Matcher::new();
        m.add_word("ab");
        m.add_word("abc");
        assert!(m.remove_word("abc"));
        assert!(!m.remove_word("abc"));
        let words = m.match_text("abcab");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].count, 2);
    }

    #[test]
    fn test_match_scores() {
        let mut m = Matcher::new();
        m.add_word("a");
        m.add_word("b");
        for _ in 0..10 {
            m.add_sample("a");
        }
        for _ in 0..90 {
            m.add_sample("x");
        }

        let words = m.match_text("abab");
        let a = words.iter().find(|w| w.word == "a").unwrap();
        let b = words.iter().find(|w| w.word == "b").unwrap();
        // tf = 0.5; idf(a) = log10(100 / 10) = 1; b never sampled so idf = 1
        assert!((a.score - 0.5).abs() < 1e-12);
        assert!((b.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_word_lists() {
        let lists = vec!["模型\n  数据 \n\n".as_bytes(), "算法\n".as_bytes()];
        let m = Matcher::from_word_lists(lists).unwrap();
        assert_eq!(m.len(), 3);
        assert!(m.contains("数据"));
    }
}
