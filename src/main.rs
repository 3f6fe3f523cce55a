use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use lexgram::config::Config;
use lexgram::corpus::{self, Document};
use lexgram::ngram::{accept_all, default_threshold, NGram, ThresholdFn};
use lexgram::output::terminal;
use lexgram::segment::DictionarySegmenter;
use lexgram::tfidf::{Matcher, Word};

/// Lexgram: phrase discovery and keyword matching for unsegmented text.
///
/// Builds n-gram phrase dictionaries from a corpus of documents and ranks
/// the keywords of a single document by TF-IDF.
#[derive(Parser)]
#[command(name = "lexgram", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an n-gram phrase dictionary from a corpus
    Build {
        /// Directory of documents (first line title, rest body)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Existing n-gram dictionaries to merge before sampling
        #[arg(long)]
        load: Vec<PathBuf>,

        /// Where to write the dumped dictionary
        #[arg(long)]
        out: PathBuf,

        /// Maximum tokens per phrase, 2 to 4 (default: LEXGRAM_NGRAM or 3)
        #[arg(long)]
        n: Option<usize>,

        /// Segmenter dictionary (default: LEXGRAM_BASE_DICT)
        #[arg(long)]
        base_dict: Option<PathBuf>,

        /// Stop-word list (default: LEXGRAM_STOP_WORDS)
        #[arg(long)]
        stop_words: Option<PathBuf>,

        /// Also block the built-in Chinese stop-word list
        #[arg(long)]
        builtin_stop_words: bool,

        /// Write every non-redundant phrase instead of applying the default threshold
        #[arg(long)]
        keep_all: bool,
    },

    /// Rank the dictionary phrases found in a document
    Scan {
        /// The document to scan
        file: PathBuf,

        /// N-gram dictionaries to scan with
        #[arg(long, required = true)]
        dict: Vec<PathBuf>,

        /// How many phrases to show (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Learn document frequencies of a vocabulary over a corpus
    Train {
        /// Vocabulary lists, one word per line
        #[arg(long, required = true)]
        vocab: Vec<PathBuf>,

        /// Directory of documents
        #[arg(long)]
        corpus: PathBuf,

        /// Where to save the TF-IDF dictionary
        #[arg(long)]
        out: PathBuf,

        /// Gzip the saved dictionary
        #[arg(long)]
        gzip: bool,
    },

    /// Score the vocabulary keywords of a document by TF-IDF
    Match {
        /// The document to score
        file: PathBuf,

        /// TF-IDF dictionaries to load (counts are added together)
        #[arg(long, required = true)]
        dict: Vec<PathBuf>,

        /// How many keywords to show; negative shows all (default: 10)
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        top: i64,

        /// The dictionaries are gzipped
        #[arg(long)]
        gzip: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexgram=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Build {
            corpus,
            load,
            out,
            n,
            base_dict,
            stop_words,
            builtin_stop_words,
            keep_all,
        } => {
            let n = n.unwrap_or(config.ngram);
            let base_dict = match base_dict {
                Some(path) => path,
                None => config.require_base_dict()?.clone(),
            };
            let stop_words = stop_words.or_else(|| config.stop_words.clone());

            let mut builder = NGram::open(n, &base_dict, stop_words.as_deref())?
                .with_sample_threshold(config.sample_threshold);
            if builtin_stop_words {
                builder = builder.with_builtin_stop_words();
            }

            for path in &load {
                builder.load_dict(path)?;
            }

            if let Some(dir) = corpus {
                let sampled = for_each_document(&dir, |doc| builder.sample(&doc.title, &doc.content))?;
                info!(documents = sampled, candidates = builder.len(), "Sampled corpus");
            }

            let policy: &ThresholdFn = if keep_all {
                &accept_all
            } else {
                &default_threshold
            };
            let written = builder.dump(&out, policy)?;

            terminal::display_dump_summary(
                &out.display().to_string(),
                builder.docs(),
                written,
                builder.len(),
            );
        }

        Commands::Scan {
            file,
            dict,
            top,
            json,
        } => {
            let mut builder = NGram::new(config.ngram, DictionarySegmenter::new())?;
            for path in &dict {
                builder.load_dict(path)?;
            }

            let doc = corpus::read_document(&file)?;
            let words = builder
                .scan(&doc.full_text())
                .top_n(builder.docs(), Some(top));
            print_words(&file, &words, json)?;
        }

        Commands::Train {
            vocab,
            corpus,
            out,
            gzip,
        } => {
            let mut matcher = Matcher::new();
            for path in &vocab {
                matcher.load_words(path)?;
            }
            println!("Vocabulary: {} words", matcher.len());

            let sampled = for_each_document(&corpus, |doc| matcher.add_sample(&doc.full_text()))?;

            matcher.save_to_file(&out, gzip || config.compress)?;
            println!(
                "\n{} {} documents, dictionary saved to {}",
                "Trained on".green().bold(),
                sampled,
                out.display()
            );
        }

        Commands::Match {
            file,
            dict,
            top,
            gzip,
            json,
        } => {
            let mut matcher = Matcher::new().with_debug(config.debug);
            for path in &dict {
                matcher.load_from_file(path, gzip || config.compress)?;
            }

            let doc = corpus::read_document(&file)?;
            let words = matcher.top_n(usize::try_from(top).ok(), &doc.full_text());
            print_words(&file, &words, json)?;
        }
    }

    Ok(())
}

/// Run `f` over every document of a corpus directory with a progress bar.
/// Unreadable files are logged and skipped. Returns how many were processed.
fn for_each_document<F>(dir: &Path, mut f: F) -> Result<usize>
where
    F: FnMut(&Document),
{
    let paths = corpus::list_documents(dir)?;
    println!("Reading {} documents from {}...", paths.len(), dir.display());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("    [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("valid template")
            .progress_chars("=> "),
    );

    let mut processed = 0;
    for path in &paths {
        match corpus::read_document(path) {
            Ok(doc) => {
                f(&doc);
                processed += 1;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(processed)
}

fn print_words(file: &Path, words: &[Word], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(words)?);
    } else {
        terminal::display_words(&file.display().to_string(), words);
    }
    Ok(())
}
