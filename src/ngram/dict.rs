// N-gram dictionary file reader.
//
// Format: the first line is the total document count of the corpus the
// dictionary was built from; every following line is
// `word\tfreq\tdocs\ttokenLength`. Records are pulled one at a time, so a
// large dictionary is never buffered whole, and the consumer can stop the
// stream early through a CancelToken.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use super::meta::Meta;
use crate::error::{LexError, Result};

/// Shared cancellation flag for a dictionary stream.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Pull-based reader over the records of an n-gram dictionary.
///
/// Iteration ends at end of file, on cancellation, or at the first line that
/// cannot be read or parsed. The last case is logged; records already
/// yielded stay valid.
pub struct DictReader<R> {
    lines: Lines<R>,
    source: PathBuf,
    total_docs: u64,
    line_no: usize,
    cancel: CancelToken,
    done: bool,
}

impl DictReader<BufReader<File>> {
    /// Open a dictionary file and read its header.
    pub fn open(path: impl AsRef<Path>, cancel: CancelToken) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::new(BufReader::new(file), path, cancel)
    }
}

impl<R: BufRead> DictReader<R> {
    /// Wrap a reader positioned at the header line. `source` only labels log
    /// messages and errors.
    pub fn new(reader: R, source: impl Into<PathBuf>, cancel: CancelToken) -> Result<Self> {
        let source = source.into();
        let mut lines = reader.lines();

        let header = lines.next().transpose()?.unwrap_or_default();
        let total_docs = header
            .trim()
            .parse::<u64>()
            .map_err(|_| LexError::DictHeader {
                path: source.clone(),
                line: header.clone(),
            })?;

        Ok(Self {
            lines,
            source,
            total_docs,
            line_no: 1,
            cancel,
            done: false,
        })
    }

    /// Document count from the header line.
    pub fn total_docs(&self) -> u64 {
        self.total_docs
    }

    /// Handle that stops this stream when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl<R: BufRead> Iterator for DictReader<R> {
    type Item = Meta;

    fn next(&mut self) -> Option<Meta> {
        while !self.done {
            if self.cancel.is_cancelled() {
                debug!(path = %self.source.display(), line = self.line_no, "Dictionary stream cancelled");
                self.done = true;
                break;
            }

            let line = match self.lines.next() {
                None => {
                    self.done = true;
                    break;
                }
                Some(Err(e)) => {
                    warn!(path = %self.source.display(), line = self.line_no + 1, error = %e, "Failed to read n-gram dictionary");
                    self.done = true;
                    break;
                }
                Some(Ok(line)) => line,
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match parse_record(&line) {
                Some(meta) => return Some(meta),
                None => {
                    warn!(path = %self.source.display(), line = self.line_no, record = %line, "Malformed n-gram dictionary record");
                    self.done = true;
                }
            }
        }
        None
    }
}

/// Parse `word\tfreq\tdocs\ttokenLength`.
fn parse_record(line: &str) -> Option<Meta> {
    let mut fields = line.trim_end_matches('\r').split('\t');
    let word = fields.next()?.trim();
    let freq = fields.next()?.trim().parse().ok()?;
    let docs = fields.next()?.trim().parse().ok()?;
    let token_len = fields.next()?.trim().parse().ok()?;
    if word.is_empty() || fields.next().is_some() {
        return None;
    }
    Some(Meta::record(word, freq, docs, token_len))
}
