//! Text normalizer: the analysis pipeline shared by indexing and querying.
//!
//! The pipeline applies, in order:
//! 1. [`AlphanumericTokenizer`]: split on runs of non-alphanumerics
//! 2. [`LowercaseFilter`]
//! 3. [`StopFilter`]: drop words in the configured [`StopWords`]
//! 4. [`StemFilter`]: Porter stemming, dropping empty stems
//!
//! The same normalizer must be used to build an index and to query it, so
//! that both sides produce the same terms.
//!
//! # Examples
//!
//! ```
//! use curio::analysis::normalizer::Normalizer;
//! use curio::analysis::token_filter::stop::StopWords;
//!
//! let normalizer = Normalizer::new(StopWords::builtin());
//! assert_eq!(
//!     normalizer.normalize("The Pixel Adventures!"),
//!     vec!["pixel", "adventur"]
//! );
//! assert!(normalizer.normalize("").is_empty());
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::{PorterStemmer, StemFilter, Stemmer};
use crate::analysis::token_filter::stop::{StopFilter, StopWords, StopWordsSource};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::alphanumeric::AlphanumericTokenizer;

/// Tokenize, lowercase, remove stop words, stem.
#[derive(Clone)]
pub struct Normalizer {
    tokenizer: Arc<dyn Tokenizer>,
    stop_words: StopWords,
    stemmer: Arc<dyn Stemmer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("stop_words", &self.stop_words.len())
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl Normalizer {
    /// Create a normalizer with the given stop words and the Porter stemmer.
    pub fn new(stop_words: StopWords) -> Self {
        Self::with_parts(stop_words, Arc::new(PorterStemmer::new()))
    }

    /// Create a normalizer whose stop words come from `source`.
    ///
    /// An unreadable stopword file degrades to no stopword filtering.
    pub fn from_source(source: &StopWordsSource) -> Self {
        Self::new(StopWords::load(source))
    }

    /// Create a normalizer with a custom stemmer.
    pub fn with_parts(stop_words: StopWords, stemmer: Arc<dyn Stemmer>) -> Self {
        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(LowercaseFilter::new()),
            Arc::new(StopFilter::new(stop_words.clone())),
            Arc::new(StemFilter::with_stemmer(Arc::clone(&stemmer))),
        ];

        Normalizer {
            tokenizer: Arc::new(AlphanumericTokenizer::new()),
            stop_words,
            stemmer,
            filters,
        }
    }

    /// The tokenizer at the head of the pipeline.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// The stop words this normalizer removes.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Run the full pipeline, keeping positions and offsets.
    pub fn analyze<'a>(&self, text: &'a str) -> TokenStream<'a> {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Normalize text into its sequence of terms.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|token| token.text).collect()
    }

    /// The term a single word maps to, ignoring stop words.
    ///
    /// Returns `None` when the stem is empty.
    pub fn term_for(&self, word: &str) -> Option<String> {
        let stem = self.stemmer.stem(&word.to_lowercase());
        if stem.is_empty() { None } else { Some(stem) }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopWords::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let normalizer = Normalizer::default();
        let tokens: Vec<_> = normalizer.analyze("The Cozy pixel-art Games").collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["cozi", "pixel", "art", "game"]);

        // Offsets still point at the original spelling.
        assert_eq!(tokens[0].start_offset, 4);
        assert_eq!(tokens[0].end_offset, 8);
    }

    #[test]
    fn test_normalize_is_restartable() {
        let normalizer = Normalizer::default();
        let first = normalizer.normalize("pixel adventure");
        let second = normalizer.normalize("pixel adventure");
        assert_eq!(first, second);
        assert_eq!(first, vec!["pixel", "adventur"]);
    }

    #[test]
    fn test_stopword_only_query_is_empty() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize("the and of").is_empty());
        assert!(normalizer.normalize("   ").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("puzzle puzzles PUZZLE"),
            vec!["puzzl", "puzzl", "puzzl"]
        );
    }

    #[test]
    fn test_without_stop_words() {
        let normalizer = Normalizer::new(StopWords::empty());
        assert_eq!(normalizer.normalize("the game"), vec!["the", "game"]);
    }

    #[test]
    fn test_term_for_ignores_stop_words() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.term_for("The").as_deref(), Some("the"));
        assert_eq!(normalizer.term_for("Adventures").as_deref(), Some("adventur"));
        assert_eq!(normalizer.term_for(""), None);
    }
}
