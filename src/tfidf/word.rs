// Word — a scored keyword, plus the TF and IDF formulas.

use serde::{Deserialize, Serialize};

/// A keyword found in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    /// Occurrences in the document
    pub count: u64,
    /// TF × IDF
    pub score: f64,
}

impl Word {
    /// Score a word given its in-document count and corpus statistics.
    pub fn scored(
        word: impl Into<String>,
        count: u64,
        doc_total: u64,
        docs: u64,
        total_docs: u64,
    ) -> Self {
        let tf = get_tf(count as f64, doc_total as f64);
        let idf = get_idf(docs as f64, total_docs as f64);
        Self {
            word: word.into(),
            count,
            score: tf * idf,
        }
    }
}

/// Inverse document frequency: `log10(total_docs / docs)`, or 1 for a word
/// no document has been seen with.
pub fn get_idf(docs: f64, total_docs: f64) -> f64 {
    if docs <= 0.0 {
        return 1.0;
    }
    (total_docs / docs).log10()
}

/// Term frequency: the share of this word among all keyword occurrences in
/// the document, or 1 when there were none.
pub fn get_tf(count: f64, doc_total: f64) -> f64 {
    if doc_total <= 0.0 {
        return 1.0;
    }
    count / doc_total
}

/// Sort by score, highest first.
pub fn sort_desc(words: &mut [Word]) {
    words.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Sort descending and keep the first `n`; `None` keeps everything.
pub fn top_n(mut words: Vec<Word>, n: Option<usize>) -> Vec<Word> {
    sort_desc(&mut words);
    if let Some(n) = n {
        words.truncate(n);
    }
    words
}
