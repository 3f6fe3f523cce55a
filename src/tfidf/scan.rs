// ScanResult — per-document keyword counts.
//
// Filled while a document is scanned, then turned into scored Words. Counts
// are kept in first-seen order so results are stable for a given input.

use std::collections::HashMap;

use super::word::{self, Word};

/// One distinct word seen in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub word: String,
    /// Occurrences in this document
    pub count: u64,
    /// Corpus document frequency of the word
    pub docs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    tallies: Vec<Tally>,
    index: HashMap<String, usize>,
    total: u64,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `word`.
    pub fn add(&mut self, word: &str, docs: u64) {
        self.add_count(word, 1, docs);
    }

    /// Record `count` occurrences of `word`.
    pub fn add_count(&mut self, word: &str, count: u64, docs: u64) {
        self.total += count;
        match self.index.get(word) {
            Some(&i) => self.tallies[i].count += count,
            None => {
                self.index.insert(word.to_string(), self.tallies.len());
                self.tallies.push(Tally {
                    word: word.to_string(),
                    count,
                    docs,
                });
            }
        }
    }

    /// Sum of all occurrences in the document.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn tallies(&self) -> &[Tally] {
        &self.tallies
    }

    pub fn count(&self, word: &str) -> u64 {
        self.index.get(word).map_or(0, |&i| self.tallies[i].count)
    }

    /// Score every distinct word. Unsorted.
    pub fn words(&self, total_docs: u64) -> Vec<Word> {
        self.tallies
            .iter()
            .map(|t| Word::scored(t.word.as_str(), t.count, self.total, t.docs, total_docs))
            .collect()
    }

    /// Scored words, highest first, truncated to `n` when given.
    pub fn top_n(&self, total_docs: u64, n: Option<usize>) -> Vec<Word> {
        word::top_n(self.words(total_docs), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let mut r = ScanResult::new();
        r.add("abc", 1);
        r.add("ab", 2);
        r.add("abc", 1);
        r.add_count("xy", 3, 0);

        assert_eq!(r.total(), 6);
        assert_eq!(r.len(), 3);
        assert_eq!(r.count("abc"), 2);
        assert_eq!(r.count("missing"), 0);
        assert_eq!(r.tallies()[0].word, "abc");
    }

    #[test]
    fn test_words_score_with_tf_idf() {
        let mut r = ScanResult::new();
        r.add("a", 10);
        r.add("a", 10);
        r.add("b", 0);
        r.add("b", 0);

        let words = r.words(100);
        // tf = 0.5, idf = log10(100/10) = 1
        assert!((words[0].score - 0.5).abs() < 1e-12);
        // unseen in corpus: idf = 1
        assert!((words[1].score - 0.5).abs() < 1e-12);
    }
}
