// N-gram dictionary building — phrase discovery, merging, dumping.

pub mod builder;
pub mod dict;
pub mod meta;
pub mod threshold;

pub use builder::{is_symbolic, NGram, MAX_GRAM, MIN_GRAM};
pub use dict::{CancelToken, DictReader};
pub use meta::Meta;
pub use threshold::{accept_all, default_threshold, ThresholdFn};
