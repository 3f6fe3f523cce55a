// Meta — corpus statistics for one candidate phrase.

use serde::Serialize;

/// Statistics the n-gram builder keeps per lexicon entry.
///
/// `freq` counts raw occurrences and `docs` counts documents, so neither
/// bounds the other. `token` is the shortest token breakdown seen for the
/// word. Entries read back from a dictionary file only know how many tokens
/// that breakdown had, which is why the count lives in `token_len` alongside
/// the (possibly empty) list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub word: String,
    #[serde(rename = "frequency")]
    pub freq: u64,
    pub docs: u64,
    #[serde(skip)]
    pub token: Vec<String>,
    #[serde(skip)]
    pub token_len: usize,
    /// Stop word: halts span growth, never dumped or scored.
    #[serde(skip)]
    pub blocked: bool,
}

impl Meta {
    /// A span seen once, with its token breakdown.
    pub fn span(word: impl Into<String>, token: Vec<String>) -> Self {
        Self {
            word: word.into(),
            freq: 1,
            docs: 0,
            token_len: token.len(),
            token,
            blocked: false,
        }
    }

    /// A stop word entry.
    pub fn stop_word(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            blocked: true,
            ..Self::default()
        }
    }

    /// A record read from an n-gram dictionary file.
    pub fn record(word: impl Into<String>, freq: u64, docs: u64, token_len: usize) -> Self {
        Self {
            word: word.into(),
            freq,
            docs,
            token: Vec::new(),
            token_len,
            blocked: false,
        }
    }

    /// Number of tokens in the shortest known breakdown (0 when unknown).
    pub fn token_count(&self) -> usize {
        self.token_len
    }

    /// Accumulate another observation of the same word.
    pub fn merge(&mut self, other: &Meta) {
        self.docs += other.docs;
        self.freq += other.freq;
        if other.blocked {
            self.blocked = true;
        }
        self.keep_shorter_token(&other.token, other.token_len);
    }

    /// Replace the breakdown if the candidate is shorter. An unknown
    /// breakdown (length 0) never replaces a known one.
    pub(crate) fn keep_shorter_token(&mut self, token: &[String], token_len: usize) {
        if token_len == 0 {
            return;
        }
        if self.token_len == 0 || token_len < self.token_len {
            self.token = token.to_vec();
            self.token_len = token_len;
        }
    }
}
