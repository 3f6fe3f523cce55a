// Dictionary-driven segmenter.
//
// Reads jieba-style dictionaries (`word [freq [tag]]`, whitespace separated,
// one entry per line) into a lexicon and cuts text with the window scanner.
// Text the dictionary does not cover falls back to one token per code point,
// except that ASCII letter/digit runs stay together and whitespace runs
// collapse to a single space.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::traits::Segmenter;
use crate::error::{LexError, Result};
use crate::lexicon::{scan, Lexicon};

#[derive(Debug, Clone, Default)]
pub struct DictionarySegmenter {
    words: Lexicon<()>,
}

impl DictionarySegmenter {
    /// An empty segmenter: every CJK character becomes its own token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the base dictionary at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut seg = Self::new();
        seg.load_user_dictionary(path.as_ref())?;
        Ok(seg)
    }

    /// Read dictionary lines from any buffered reader. Returns the number of
    /// words added.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> std::io::Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            if let Some(word) = line.split_whitespace().next() {
                if self.words.insert(word, ()).is_none() {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    pub fn add_word(&mut self, word: &str) {
        self.words.insert(word.trim(), ());
    }

    /// Number of dictionary words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Segmenter for DictionarySegmenter {
    fn cut(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut cursor = 0;

        scan(&self.words, &chars, |m| {
            push_uncovered(&chars[cursor..m.start], &mut tokens);
            tokens.push(chars[m.start..m.end].iter().collect());
            cursor = m.end;
        });
        push_uncovered(&chars[cursor..], &mut tokens);

        tokens
    }

    fn load_user_dictionary(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|source| LexError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self
            .read_from(BufReader::new(file))
            .map_err(|source| LexError::Dictionary {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), added, "Loaded segmenter dictionary");
        Ok(())
    }
}

/// Split text the dictionary did not match.
fn push_uncovered(chars: &[char], tokens: &mut Vec<String>) {
    let mut run = String::new();
    let mut in_space = false;

    for &ch in chars {
        if ch.is_ascii_alphanumeric() {
            in_space = false;
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            tokens.push(std::mem::take(&mut run));
        }
        if ch.is_whitespace() {
            if !in_space {
                tokens.push(" ".to_string());
                in_space = true;
            }
            continue;
        }
        in_space = false;
        tokens.push(ch.to_string());
    }

    if !run.is_empty() {
        tokens.push(run);
    }
}
