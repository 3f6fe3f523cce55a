// Lexicon — the shared trie and the greedy window scanner built on it.

pub mod scanner;
pub mod trie;

pub use scanner::{find_all, scan, scan_filtered, Match};
pub use trie::Lexicon;
