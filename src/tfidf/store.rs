// Matcher persistence.
//
// CSV layout: a header record whose first field is the total document count
// (further header columns are reserved), then one `word,docs` record per
// vocabulary word. Files may be gzip-wrapped. Loading adds to whatever the
// matcher already holds, so dictionaries built by separate workers can be
// combined.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use super::matcher::{Matcher, TermMeta};
use crate::error::{LexError, Result};

// Header columns
const HEADER_TOTAL_DOCS: usize = 0;
const HEADER_COLUMNS: usize = 1;

// Body columns
const BODY_WORD: usize = 0;
const BODY_DOCS: usize = 1;
const BODY_COLUMNS: usize = 2;

impl Matcher {
    /// Write the dictionary as CSV.
    pub fn save<W: Write>(&self, w: W) -> Result<()> {
        let mut out = csv::WriterBuilder::new().flexible(true).from_writer(w);

        let mut head = vec![String::new(); HEADER_COLUMNS];
        head[HEADER_TOTAL_DOCS] = self.docs.to_string();
        out.write_record(&head)?;

        for (word, meta) in self.lexicon.iter() {
            let docs = meta.docs.to_string();
            out.write_record([word.as_str(), docs.as_str()])?;
        }

        out.flush()?;
        Ok(())
    }

    /// Write the dictionary to `path`, creating parent directories, gzip
    /// compressed when `compress` is set.
    pub fn save_to_file(&self, path: impl AsRef<Path>, compress: bool) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        if compress {
            let mut gz = GzEncoder::new(file, Compression::default());
            self.save(&mut gz)?;
            gz.finish()?;
        } else {
            self.save(BufWriter::new(file))?;
        }

        debug!(path = %path.display(), words = self.len(), docs = self.docs, compress, "Saved TF-IDF dictionary");
        Ok(())
    }

    /// Read a CSV dictionary, adding its counts to this matcher. Empty input
    /// is not an error; a record with a blank word ends the body.
    pub fn load<R: Read>(&mut self, r: R) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(r);
        let mut records = reader.records();

        let head = match records.next() {
            None => return Ok(()),
            Some(head) => head?,
        };
        let total = head
            .get(HEADER_TOTAL_DOCS)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|d| *d > 0.0);
        if let Some(total) = total {
            self.docs += total.round() as u64;
        }

        for record in records {
            let record = record?;
            if record.len() != BODY_COLUMNS {
                return Err(LexError::TermRecord {
                    line: record.position().map_or(0, |p| p.line()),
                });
            }

            let word = record[BODY_WORD].trim();
            if word.is_empty() {
                break;
            }
            let docs = record[BODY_DOCS]
                .trim()
                .parse::<f64>()
                .map_or(0, |d| d.max(0.0).round() as u64);

            match self.lexicon.get_mut(word) {
                Some(meta) => meta.docs += docs,
                None => {
                    self.lexicon.insert(
                        word,
                        TermMeta {
                            word: word.to_string(),
                            docs,
                        },
                    );
                }
            }
        }

        Ok(())
    }

    /// Load a dictionary file written by `save_to_file`.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, compress: bool) -> Result<()> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        if compress {
            self.load(GzDecoder::new(file))?;
        } else {
            self.load(file)?;
        }
        debug!(path = %path.display(), words = self.len(), docs = self.docs, "Loaded TF-IDF dictionary");
        Ok(())
    }
}
