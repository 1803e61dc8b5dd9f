//! Stem-aware highlighting of query matches in original text.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;

/// Configuration for text highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// HTML tag to wrap highlighted terms (e.g., "mark", "em", "strong").
    pub tag: String,
    /// CSS class to add to highlight tags.
    pub css_class: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "mark".to_string(),
            css_class: None,
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML tag for highlighting.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    /// Build the opening HTML tag.
    pub fn opening_tag(&self) -> String {
        if let Some(ref css_class) = self.css_class {
            format!("<{} class=\"{}\">", self.tag, css_class)
        } else {
            format!("<{}>", self.tag)
        }
    }

    /// Build the closing HTML tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Wraps words whose stem is a query term in highlight tags.
///
/// The text is split the way the [`Normalizer`] splits it, but nothing is
/// dropped: stop words, punctuation and whitespace pass through verbatim,
/// and matched words keep their original spelling. [`Highlighter::strip`]
/// given the same query terms gives back the input exactly, even when the
/// input already contains the highlight tags.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
///
/// use curio::analysis::normalizer::Normalizer;
/// use curio::search::highlight::{HighlightConfig, Highlighter};
///
/// let highlighter = Highlighter::new(Normalizer::default(), HighlightConfig::default());
/// let terms: HashSet<String> = ["adventur".to_string()].into();
///
/// assert_eq!(
///     highlighter.highlight("Two Adventures, one game.", &terms),
///     "Two <mark>Adventures</mark>, one game."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    normalizer: Normalizer,
    opening_tag: String,
    closing_tag: String,
}

impl Highlighter {
    /// Create a highlighter stemming with `normalizer`.
    pub fn new(normalizer: Normalizer, config: HighlightConfig) -> Self {
        Highlighter {
            normalizer,
            opening_tag: config.opening_tag(),
            closing_tag: config.closing_tag(),
        }
    }

    /// Highlight every word of `text` whose stem is in `query_terms`.
    pub fn highlight(&self, text: &str, query_terms: &HashSet<String>) -> String {
        if query_terms.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len() + 16);
        let mut last = 0;
        for token in self.normalizer.tokenizer().tokenize(text) {
            if !self.is_match(&token.text, query_terms) {
                continue;
            }

            output.push_str(&text[last..token.start_offset]);
            output.push_str(&self.opening_tag);
            output.push_str(&text[token.start_offset..token.end_offset]);
            output.push_str(&self.closing_tag);
            last = token.end_offset;
        }
        output.push_str(&text[last..]);
        output
    }

    fn is_match(&self, word: &str, query_terms: &HashSet<String>) -> bool {
        self.normalizer
            .term_for(word)
            .is_some_and(|term| query_terms.contains(&term))
    }

    /// Remove the tags [`Highlighter::highlight`] inserted for `query_terms`.
    ///
    /// Only an opening tag followed by a whole alphanumeric run that matches
    /// a query term and then a closing tag is unwrapped. Tag text that was
    /// already in the input is never directly followed by such a run, since
    /// the run itself would have been wrapped, so it is kept.
    pub fn strip(&self, highlighted: &str, query_terms: &HashSet<String>) -> String {
        let mut output = String::with_capacity(highlighted.len());
        let mut rest = highlighted;
        while let Some(at) = rest.find(self.opening_tag.as_str()) {
            output.push_str(&rest[..at]);
            let after_open = &rest[at + self.opening_tag.len()..];
            let run_len = after_open
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(after_open.len());
            let (word, tail) = after_open.split_at(run_len);

            match tail.strip_prefix(self.closing_tag.as_str()) {
                Some(tail) if run_len > 0 && self.is_match(word, query_terms) => {
                    output.push_str(word);
                    rest = tail;
                }
                _ => {
                    output.push_str(&self.opening_tag);
                    rest = after_open;
                }
            }
        }
        output.push_str(rest);
        output
    }
}
