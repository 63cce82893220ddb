//! Built-in filter algorithms.

mod entropy;
mod minhash;
mod ngram;
mod readability;

pub use entropy::{shannon_entropy, EntropyFilter};
pub use minhash::MinHashFilter;
pub use ngram::{repetition_ratio, NGramFilter};
pub use readability::{count_syllables, fog_index, ReadabilityFilter};
