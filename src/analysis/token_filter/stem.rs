//! Stemming token filter and stemmer implementations.

use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;

/// Trait for stemming algorithms.
///
/// Implementations must be deterministic: the same word always yields the
/// same stem, so that index-time and query-time terms converge.
pub trait Stemmer: Send + Sync + std::fmt::Debug {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod porter;

pub use porter::PorterStemmer;

/// Filter that applies stemming to tokens.
///
/// Tokens whose stem is empty are dropped.
#[derive(Debug, Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Arc::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter<'a>(&self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        let stemmer = Arc::clone(&self.stemmer);
        Box::new(tokens.filter_map(move |token| {
            if token.is_stopped() {
                return Some(token);
            }
            let stemmed = stemmer.stem(&token.text);
            if stemmed.is_empty() {
                None
            } else {
                Some(token.with_text(stemmed))
            }
        }))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    /// Strips every vowel; stems some words down to nothing.
    #[derive(Debug)]
    struct VowelStripper;

    impl Stemmer for VowelStripper {
        fn stem(&self, word: &str) -> String {
            word.chars().filter(|c| !"aeiou".contains(*c)).collect()
        }

        fn name(&self) -> &'static str {
            "vowel_stripper"
        }
    }

    #[test]
    fn test_stem_filter() {
        let filter = StemFilter::new();
        let tokens = vec![
            Token::new("running", 0),
            Token::new("flies", 1),
            Token::new("test", 2).stop(),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "run");
        assert_eq!(result[1].text, "fli");
        assert_eq!(result[2].text, "test"); // Stopped tokens are not processed
        assert!(result[2].is_stopped());
    }

    #[test]
    fn test_empty_stems_are_dropped() {
        let filter = StemFilter::with_stemmer(Arc::new(VowelStripper));
        let tokens = vec![Token::new("aeiou", 0), Token::new("pixel", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "pxl");
        assert_eq!(result[0].position, 1);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StemFilter::new().name(), "stem");
    }
}
