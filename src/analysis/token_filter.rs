//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer and return a new
//! stream. The normalizer chains them in this order:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer → terms
//! ```
//!
//! # Examples
//!
//! ```
//! use curio::analysis::token_filter::Filter;
//! use curio::analysis::token_filter::lowercase::LowercaseFilter;
//! use curio::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
///
/// Filtering cannot fail. The trait requires `Send + Sync` to allow use in
/// concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter<'a>(&self, tokens: TokenStream<'a>) -> TokenStream<'a>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stem;
pub mod stop;
