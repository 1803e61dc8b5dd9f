//! Alphanumeric-run tokenizer.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};

/// Runs of ASCII letters and digits; everything else separates tokens.
static ALPHANUMERIC_RUN: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(r"[A-Za-z0-9]+").expect("Alphanumeric run pattern should be valid"))
});

/// A tokenizer that emits every maximal run of ASCII alphanumerics.
///
/// Punctuation, whitespace and non-ASCII characters are separators. Offsets
/// are byte offsets into the input, so `&text[t.start_offset..t.end_offset]`
/// is always the token's original spelling.
#[derive(Clone, Debug)]
pub struct AlphanumericTokenizer {
    pattern: Arc<Regex>,
}

impl AlphanumericTokenizer {
    /// Create a new alphanumeric tokenizer.
    pub fn new() -> Self {
        AlphanumericTokenizer {
            pattern: Arc::clone(&ALPHANUMERIC_RUN),
        }
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for AlphanumericTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for AlphanumericTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "alphanumeric"
    }
}
