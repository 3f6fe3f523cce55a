// Segmenter trait — the swap-ready word segmentation capability.
//
// The n-gram builder only needs "text in, ordered tokens out". The CLI and
// tests use the dictionary-driven implementation in `dictionary.rs`.

use std::path::Path;

use crate::error::Result;

/// Splits unsegmented text into an ordered list of coarse tokens.
pub trait Segmenter: Send {
    /// Cut `text` into tokens. Concatenating the tokens reproduces the text,
    /// except that runs of whitespace may be collapsed.
    fn cut(&self, text: &str) -> Vec<String>;

    /// Extend the segmenter's vocabulary from a user dictionary file.
    fn load_user_dictionary(&mut self, path: &Path) -> Result<()>;
}
