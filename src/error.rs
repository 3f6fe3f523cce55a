// Error types for the library surface.
//
// Construction and file-format failures get a typed variant so callers can
// tell a bad configuration apart from a broken file. The CLI wraps these in
// anyhow like every other error.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexError>;

#[derive(Debug, Error)]
pub enum LexError {
    /// The n-gram window size must be between 2 and 4 tokens.
    #[error("n-gram size must be between 2 and 4, got {0}")]
    InvalidGramSize(usize),

    /// A segmenter or stop-word dictionary could not be read.
    #[error("failed to load dictionary {}: {source}", path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The first line of an n-gram dictionary is not a document count.
    #[error("invalid n-gram dictionary header in {}: {line:?}", path.display())]
    DictHeader { path: PathBuf, line: String },

    /// A TF-IDF dictionary body row without exactly `word,docs`.
    #[error("malformed term dictionary record at line {line}")]
    TermRecord { line: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
