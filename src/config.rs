use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override anything set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum tokens per n-gram span (2 to 4)
    pub ngram: usize,
    /// Base segmenter dictionary (jieba format)
    pub base_dict: Option<PathBuf>,
    /// Stop-word list, one word per line
    pub stop_words: Option<PathBuf>,
    /// Minimum per-document count for body spans to be merged
    pub sample_threshold: u64,
    /// Gzip TF-IDF dictionaries on save and load
    pub compress: bool,
    /// Log the TF/IDF breakdown of every match
    pub debug: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let ngram = match env::var("LEXGRAM_NGRAM") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("LEXGRAM_NGRAM must be a number, got {v:?}"))?,
            Err(_) => 3,
        };

        let sample_threshold = match env::var("LEXGRAM_SAMPLE_THRESHOLD") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("LEXGRAM_SAMPLE_THRESHOLD must be a number, got {v:?}"))?,
            Err(_) => 1,
        };

        Ok(Self {
            ngram,
            base_dict: env::var("LEXGRAM_BASE_DICT").ok().map(PathBuf::from),
            stop_words: env::var("LEXGRAM_STOP_WORDS").ok().map(PathBuf::from),
            sample_threshold,
            compress: env_flag("LEXGRAM_COMPRESS"),
            debug: env_flag("LEXGRAM_DEBUG"),
        })
    }

    /// Check that a base segmenter dictionary is configured.
    /// Call this before building an n-gram builder.
    pub fn require_base_dict(&self) -> Result<&PathBuf> {
        match &self.base_dict {
            Some(path) => Ok(path),
            None => anyhow::bail!(
                "LEXGRAM_BASE_DICT not set. Pass --base-dict or add it to your .env file."
            ),
        }
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref().map(str::trim),
        Ok("1") | Ok("true") | Ok("yes") | Ok("on")
    )
}
