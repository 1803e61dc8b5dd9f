//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline: they split raw
//! text into [`Token`](crate::analysis::token::Token)s carrying byte offsets
//! into the input.
//!
//! # Examples
//!
//! ```
//! use curio::analysis::tokenizer::Tokenizer;
//! use curio::analysis::tokenizer::alphanumeric::AlphanumericTokenizer;
//!
//! let tokenizer = AlphanumericTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokenization cannot fail: every string has a (possibly empty) token
/// sequence. The trait requires `Send + Sync` so one tokenizer can be shared
/// by parallel search workers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanumeric;
