//! Stop word list and stop filter.
//!
//! [`StopWords`] is an immutable, cheaply clonable word set built once from a
//! [`StopWordsSource`] and handed to every normalizer that needs it. When a
//! configured stopword file cannot be read the set degrades to empty instead
//! of failing, and the condition is logged and remembered.
//!
//! # Examples
//!
//! ```
//! use curio::analysis::token_filter::Filter;
//! use curio::analysis::token_filter::stop::{StopFilter, StopWords};
//! use curio::analysis::token::Token;
//!
//! let filter = StopFilter::new(StopWords::builtin());
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("brown", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! assert_eq!(result[1].text, "brown");
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::{CurioError, Result};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|&s| s.to_string())
            .collect(),
    )
});

/// Where a stop word list comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWordsSource {
    /// The embedded English list.
    #[default]
    Builtin,
    /// A text file with one word per line; `#` starts a comment line.
    File(PathBuf),
    /// No stop word filtering.
    None,
}

/// An immutable stop word set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: Arc<HashSet<String>>,
    degraded: bool,
}

impl StopWords {
    /// The embedded English stop word list.
    pub fn builtin() -> Self {
        StopWords {
            words: Arc::clone(&DEFAULT_ENGLISH_STOP_WORDS_SET),
            degraded: false,
        }
    }

    /// An empty stop word set.
    pub fn empty() -> Self {
        StopWords {
            words: Arc::new(HashSet::new()),
            degraded: false,
        }
    }

    /// Build a stop word set from a list of words (lowercased).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords {
            words: Arc::new(
                words
                    .into_iter()
                    .map(|w| w.as_ref().trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect(),
            ),
            degraded: false,
        }
    }

    /// Read a stop word file.
    ///
    /// Lines are trimmed and lowercased; blank lines and lines starting with
    /// `#` are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CurioError::resource_unavailable(format!(
                "stopword list {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        ))
    }

    /// Load the stop words named by `source`.
    ///
    /// A file that cannot be read yields an empty, degraded set and a
    /// warning rather than an error.
    pub fn load(source: &StopWordsSource) -> Self {
        match source {
            StopWordsSource::Builtin => Self::builtin(),
            StopWordsSource::None => Self::empty(),
            StopWordsSource::File(path) => match Self::from_file(path) {
                Ok(words) => {
                    log::info!(
                        "Loaded {} stopwords from {}",
                        words.len(),
                        path.display()
                    );
                    words
                }
                Err(e) => {
                    log::warn!("{e}; continuing without stopword filtering");
                    StopWords {
                        words: Arc::new(HashSet::new()),
                        degraded: true,
                    }
                }
            },
        }
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Whether the configured list could not be loaded.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A filter that removes stop words from the token stream.
///
/// Tokens are compared as they arrive, so the filter belongs after
/// lowercasing.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: StopWords,
}

impl StopFilter {
    /// Create a new stop filter over the given word set.
    pub fn new(stop_words: StopWords) -> Self {
        StopFilter { stop_words }
    }

    /// The word set this filter removes.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new(StopWords::builtin())
    }
}

impl Filter for StopFilter {
    fn filter<'a>(&self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        let words = Arc::clone(&self.stop_words.words);
        Box::new(tokens.filter(move |token| token.is_stopped() || !words.contains(&token.text)))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::new(StopWords::from_words(["the", "and", "or"]));
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_builtin_list() {
        let words = StopWords::builtin();
        assert!(words.contains("the"));
        assert!(!words.contains("pixel"));
        assert_eq!(words.len(), DEFAULT_ENGLISH_STOP_WORDS.len());
        assert!(!words.is_degraded());
    }

    #[test]
    fn test_from_file_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "  The ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "game").unwrap();

        let words = StopWords::from_file(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("the"));
        assert!(words.contains("game"));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = StopWordsSource::File(dir.path().join("missing.txt"));

        let words = StopWords::load(&source);
        assert!(words.is_empty());
        assert!(words.is_degraded());
    }

    #[test]
    fn test_source_none_is_empty_but_not_degraded() {
        let words = StopWords::load(&StopWordsSource::None);
        assert!(words.is_empty());
        assert!(!words.is_degraded());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::default().name(), "stop");
    }
}
