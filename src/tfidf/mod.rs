// TF-IDF keyword matching against a fixed vocabulary.

pub mod matcher;
pub mod scan;
pub mod store;
pub mod word;

pub use matcher::{Matcher, TermMeta};
pub use scan::{ScanResult, Tally};
pub use word::{get_idf, get_tf, top_n, Word};
