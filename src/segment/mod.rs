// Word segmentation — trait-based so the n-gram builder can take any cutter.

pub mod dictionary;
pub mod traits;

pub use dictionary::DictionarySegmenter;
pub use traits::Segmenter;
