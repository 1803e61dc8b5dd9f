//! Text analysis: tokenization, lowercasing, stop word removal and stemming.

pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use normalizer::Normalizer;
