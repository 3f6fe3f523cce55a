// Lexgram: phrase discovery and keyword matching for unsegmented text.
//
// This is the library root. The lexicon module holds the shared trie and
// greedy window scanner; ngram builds phrase dictionaries from a corpus and
// tfidf scores vocabulary words within a document.

pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod ngram;
pub mod output;
pub mod segment;
pub mod tfidf;

pub use error::{LexError, Result};
